//! End-to-end tests of the HTTP surface against a scripted CLI.

use std::time::Duration;

use serde_json::json;

use coral_gateway::proxy::RawOutcome;

mod common;
use common::{err, ok, ScriptedInvoker, TestGateway, TEST_DATADIR};

#[tokio::test]
async fn test_health() {
    let gateway = TestGateway::start(ScriptedInvoker::new(|_| err("unused"))).await;

    let (status, body) = gateway.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_info_composes_three_commands() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "getblockchaininfo" => ok(r#"{"chain":"regtest","blocks":12}"#),
        "getnetworkinfo" => ok(r#"{"connections":3}"#),
        "getmininginfo" => RawOutcome::TimedOut,
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway.get("/api/info").await;
    assert_eq!(status, 200);
    assert_eq!(body["blockchain"]["blocks"], 12);
    assert_eq!(body["network"]["connections"], 3);
    assert_eq!(
        body["mining"],
        json!({"error": "command timed out", "kind": "timeout"})
    );
    assert_eq!(
        invoker.methods(),
        vec!["getblockchaininfo", "getnetworkinfo", "getmininginfo"]
    );
}

#[tokio::test]
async fn test_balance_is_scoped_and_numeric() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "getbalance" => ok("12.50000000"),
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway.get("/api/wallet/savings/balance").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"balance": 12.5}));

    let calls = invoker.calls();
    assert_eq!(
        calls[0].argv,
        vec![
            format!("-datadir={}", TEST_DATADIR),
            "-rpcwallet=savings".to_string(),
            "getbalance".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_repeated_reads_are_independent_and_identical() {
    let invoker = ScriptedInvoker::new(|_| ok("3.00000000"));
    let gateway = TestGateway::start(invoker.clone()).await;

    let first = gateway.get("/api/wallet/w/balance").await;
    let second = gateway.get("/api/wallet/w/balance").await;
    assert_eq!(first, second);
    assert_eq!(invoker.calls().len(), 2);
}

#[tokio::test]
async fn test_process_error_surfaces_detail() {
    let invoker = ScriptedInvoker::new(|_| {
        err("error code: -18\nerror message:\nRequested wallet does not exist or is not loaded")
    });
    let gateway = TestGateway::start(invoker).await;

    let (status, body) = gateway.get("/api/wallet/ghost").await;
    assert_eq!(status, 502);
    assert_eq!(body["kind"], "process_error");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .ends_with("Requested wallet does not exist or is not loaded"));
}

#[tokio::test]
async fn test_send_rejects_non_positive_amount_without_spawning() {
    let invoker = ScriptedInvoker::new(|_| ok("txid"));
    let gateway = TestGateway::start(invoker.clone()).await;

    for amount in [json!(0), json!(-2.5), json!("0"), json!("lots")] {
        let (status, body) = gateway
            .post(
                "/api/wallet/w/send",
                json!({"address": "cr1qdest", "amount": amount}),
            )
            .await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Invalid amount");
    }

    let (status, body) = gateway
        .post("/api/wallet/w/send", json!({"amount": 1}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "No address provided");

    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn test_send_uses_send_deadline() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "sendtoaddress" => ok("f00dfeed"),
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway
        .post(
            "/api/wallet/w/send",
            json!({"address": "cr1qdest", "amount": "0.25"}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"txid": "f00dfeed"}));

    let calls = invoker.calls();
    assert_eq!(calls[0].args, vec!["cr1qdest", "0.25"]);
    assert_eq!(calls[0].timeout, Duration::from_secs(60));
}

#[tokio::test]
async fn test_import_timeout_says_rescan_may_continue() {
    let invoker = ScriptedInvoker::new(|_| RawOutcome::TimedOut);
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway
        .post(
            "/api/wallet/w/importprivkey",
            json!({"privkey": "cVt4o7BGAig1UXywgGSmARhxMdzP5qvQsxKkSsc1XEkw3tDTQFpy"}),
        )
        .await;
    assert_eq!(status, 504);
    assert_eq!(body["error"], "Import timed out (rescan may still be in progress)");

    let calls = invoker.calls();
    assert_eq!(calls[0].method, "importprivkey");
    assert_eq!(calls[0].arg(1), "");
    assert_eq!(calls[0].arg(2), "true");
    assert_eq!(calls[0].timeout, Duration::from_secs(300));
}

#[tokio::test]
async fn test_import_success() {
    let invoker = ScriptedInvoker::new(|_| ok(""));
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway
        .post(
            "/api/wallet/w/importprivkey",
            json!({"privkey": "key", "label": "cold", "rescan": false}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(invoker.calls()[0].args, vec!["key", "cold", "false"]);
}

#[tokio::test]
async fn test_rescan_timeout() {
    let invoker = ScriptedInvoker::new(|_| RawOutcome::TimedOut);
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway
        .post("/api/wallet/w/rescanblockchain", json!({"start_height": 100}))
        .await;
    assert_eq!(status, 504);
    assert_eq!(body["error"], "Rescan timed out (may still be in progress)");
    assert_eq!(invoker.calls()[0].args, vec!["100"]);
    assert_eq!(invoker.calls()[0].timeout, Duration::from_secs(600));
}

#[tokio::test]
async fn test_block_endpoint_by_height() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "getblockhash" => ok("0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206"),
        "getblock" => ok(r#"{"height":0,"tx":["4a5e1e"]}"#),
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway.get("/api/block/0").await;
    assert_eq!(status, 200);
    assert_eq!(body["height"], 0);
    assert_eq!(invoker.methods(), vec!["getblockhash", "getblock"]);
}

#[tokio::test]
async fn test_generate_reports_chosen_address() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "listwallets" => ok(r#"["miner"]"#),
        "getnewaddress" => ok("cr1qminer"),
        "generatetoaddress" => ok(r#"["h1","h2","h3"]"#),
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker).await;

    let (status, body) = gateway
        .post("/api/mining/generate", json!({"blocks": 3}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": ["h1", "h2", "h3"], "address": "cr1qminer"}));
}

#[tokio::test]
async fn test_generate_without_wallet() {
    let invoker = ScriptedInvoker::new(|_| ok("[]"));
    let gateway = TestGateway::start(invoker).await;

    let (status, body) = gateway.post("/api/mining/generate", json!({})).await;
    assert_eq!(status, 502);
    assert!(body["error"].as_str().unwrap().contains("No wallet loaded"));
}

#[tokio::test]
async fn test_recent_blocks_endpoint() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "getblockchaininfo" => ok(r#"{"blocks":1}"#),
        "getblockhash" => ok(&format!("h{}", call.arg(0))),
        "getblock" => ok(r#"{"time":1,"tx":[],"size":2,"weight":3}"#),
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker).await;

    let (status, body) = gateway.get("/api/recentblocks").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"blocks": [
            {"height": 1, "hash": "h1", "time": 1, "tx_count": 0, "size": 2, "weight": 3},
            {"height": 0, "hash": "h0", "time": 1, "tx_count": 0, "size": 2, "weight": 3},
        ]})
    );

    let (status, body) = gateway.get("/api/recentblocks?count=zero").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "count must be a positive integer");
}

#[tokio::test]
async fn test_rpc_passthrough() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "getblockhash" => ok("abc123"),
        _ => err("Method not found"),
    });
    let gateway = TestGateway::start(invoker.clone()).await;

    let (status, body) = gateway
        .post("/api/rpc", json!({"command": "getblockhash   42"}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": "abc123"}));
    assert_eq!(invoker.calls()[0].args, vec!["42"]);

    let (status, body) = gateway.post("/api/rpc", json!({"command": "   "})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "No command provided");

    let (status, body) = gateway.post("/api/rpc", json!({"command": "bogus"})).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"], "Method not found");
}

#[tokio::test]
async fn test_rpc_rejects_global_flags() {
    let invoker = ScriptedInvoker::new(|_| ok("1.0"));
    let gateway = TestGateway::start(invoker.clone()).await;

    for line in ["-datadir=/etc getbalance", "-rpcwallet=other getbalance"] {
        let (status, body) = gateway.post("/api/rpc", json!({"command": line})).await;
        assert_eq!(status, 400);
        assert_eq!(body["kind"], "validation_error");
    }
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let invoker = ScriptedInvoker::new(|_| ok("{}"));
    let gateway = TestGateway::start(invoker.clone()).await;

    let res = gateway
        .client
        .post(gateway.url("/api/loadwallet"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn test_listing_and_validation_endpoints() {
    let invoker = ScriptedInvoker::new(|call| match call.method.as_str() {
        "getpeerinfo" => ok(r#"[{"id":0,"addr":"10.0.0.2:9333"}]"#),
        "listbanned" => ok("null"),
        "addnode" => ok(""),
        _ => err("unexpected"),
    });
    let gateway = TestGateway::start(invoker.clone()).await;

    let (_, body) = gateway.get("/api/peers").await;
    assert_eq!(body["peers"][0]["addr"], "10.0.0.2:9333");

    let (_, body) = gateway.get("/api/banned").await;
    assert_eq!(body, json!({"banned": []}));

    let (status, _) = gateway
        .post("/api/addnode", json!({"node": "10.0.0.3:9333", "command": "explode"}))
        .await;
    assert_eq!(status, 400);

    let (status, body) = gateway
        .post("/api/addnode", json!({"node": "10.0.0.3:9333"}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": ""}));
    assert_eq!(invoker.calls().last().unwrap().args, vec!["10.0.0.3:9333", "add"]);

    let (status, _) = gateway.get("/api/estimatesmartfee/0").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let gateway = TestGateway::start(ScriptedInvoker::new(|_| ok("1"))).await;

    let res = gateway.client.get(gateway.url("/health")).send().await.unwrap();
    let id = res.headers().get("x-request-id").expect("request id missing");
    assert!(!id.is_empty());

    let res = gateway
        .client
        .get(gateway.url("/health"))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "client-chosen");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let gateway = TestGateway::start(ScriptedInvoker::new(|_| ok("1"))).await;

    let (status, body) = gateway.get("/api/nope").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "No such endpoint");
}
