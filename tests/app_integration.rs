use std::fs;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn mount_rpc_method(server: &MockServer, rpc_method: &str, result_json: &str) {
        let body = format!(r#"{{"jsonrpc": "2.0", "id": 1, "result": {result_json}}}"#);
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({"method": rpc_method})))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }
}

fn write_config(base_url: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        plans:
          - name: "Core SIP"
            monthly_contribution: 100.0
            annual_return_pct: 12.0
            period_years: 1
        providers:
          rpc:
            base_url: {base_url}
        currency: "ETH"
    "#
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_plan_flow_with_configured_plans() {
    let config_file = write_config("http://127.0.0.1:8545");

    let result = sipvault::run_command(
        sipvault::AppCommand::Plan {
            years: None,
            monthly: None,
            rate: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Plan command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_plan_flow_with_ad_hoc_values() {
    let config_file = write_config("http://127.0.0.1:8545");

    let result = sipvault::run_command(
        sipvault::AppCommand::Plan {
            years: Some(1),
            monthly: Some(100.0),
            rate: Some(12.0),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_projections_flow() {
    let config_file = write_config("http://127.0.0.1:8545");

    let result = sipvault::run_command(
        sipvault::AppCommand::Projections,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_balance_flow_with_mock_rpc() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_accounts",
        r#"["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]"#,
    )
    .await;
    test_utils::mount_rpc_method(&mock_server, "eth_getBalance", r#""0xde0b6b3a7640000""#).await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_call",
        r#""0x0000000000000000000000000000000000000000000000000000000000000005""#,
    )
    .await;

    let config_file = write_config(&mock_server.uri());
    info!("Running balance command against {}", mock_server.uri());

    let result = sipvault::run_command(
        sipvault::AppCommand::Balance,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Balance command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_deposit_flow_with_mock_rpc() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_requestAccounts",
        r#"["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]"#,
    )
    .await;
    test_utils::mount_rpc_method(&mock_server, "eth_sendTransaction", r#""0xdeadbeef""#).await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_getTransactionReceipt",
        r#"{"transactionHash": "0xdeadbeef", "blockNumber": "0x1"}"#,
    )
    .await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_call",
        r#""0x0000000000000000000000000000000000000000000000000000000000000002""#,
    )
    .await;

    let config_file = write_config(&mock_server.uri());

    let result = sipvault::run_command(
        sipvault::AppCommand::Deposit { amount: 2 },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Deposit command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_withdraw_flow_with_mock_rpc() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_requestAccounts",
        r#"["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]"#,
    )
    .await;
    test_utils::mount_rpc_method(&mock_server, "eth_sendTransaction", r#""0xcafef00d""#).await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_getTransactionReceipt",
        r#"{"transactionHash": "0xcafef00d", "blockNumber": "0x3"}"#,
    )
    .await;
    test_utils::mount_rpc_method(
        &mock_server,
        "eth_call",
        r#""0x0000000000000000000000000000000000000000000000000000000000000000""#,
    )
    .await;

    let config_file = write_config(&mock_server.uri());

    let result = sipvault::run_command(
        sipvault::AppCommand::Withdraw { amount: 1 },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Withdraw command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_balance_flow_without_accounts_is_a_clear_error() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rpc_method(&mock_server, "eth_accounts", r#"[]"#).await;

    let config_file = write_config(&mock_server.uri());

    let result = sipvault::run_command(
        sipvault::AppCommand::Balance,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("no accounts")
    );
}
