mod common;

use axum::http::StatusCode;
use billing_mock::domain::payout::PayoutState;
use common::*;
use rand::Rng;
use serde_json::json;

#[tokio::test]
async fn test_random_start_sequences_complete_in_order() {
    let mut rng = rand::thread_rng();

    for _ in 0..10 {
        let app = app();
        let runs = rng.gen_range(1..=8);
        let mut expected = Vec::new();

        for run in 0..runs {
            let item_count = rng.gen_range(0..=4);
            let pending = rng.gen_bool(0.3);
            if pending {
                get(&app, "/set-pending").await;
            }

            let items = (0..item_count)
                .map(|i| line_item(&format!("p-{run}-{i}"), json!(i + 1), "EUR"))
                .collect();
            let body = start_body(
                &format!("http://shop.test/ok?run={run}"),
                &format!("http://shop.test/ko?run={run}"),
                items,
            );
            let response = start_payment(&app, &body, Some(&format!("token-{run}"))).await;
            assert_eq!(response.status(), StatusCode::OK);

            expected.push((run, item_count, pending));
        }

        let last_token = format!("token-{}", runs - 1);
        for (run, item_count, pending) in expected {
            let response = get(&app, "/checkin").await;
            assert_eq!(response.status(), StatusCode::FOUND);

            let target = location(&response);
            assert!(target.starts_with(&format!("http://shop.test/ok?run={run}&jwt=")));
            assert_eq!(query_param(&target, "token"), Some(last_token.clone()));

            let assertion = decode_assertion(&target);
            assert_eq!(assertion.payout_list.len(), item_count);
            let state = if pending {
                PayoutState::Pending
            } else {
                PayoutState::Processed
            };
            assert!(assertion.payout_list.iter().all(|r| r.state == state));
            for (i, record) in assertion.payout_list.iter().enumerate() {
                assert_eq!(
                    record.product_provider_external_id,
                    Some(json!(format!("p-{run}-{i}")))
                );
            }
        }

        // Only the orphaned cancellations remain, oldest first
        let response = get(&app, "/checkin").await;
        assert_eq!(
            location(&response),
            format!("http://shop.test/ko?run=0&token={last_token}")
        );
    }
}

#[tokio::test]
async fn test_set_pending_affects_only_next_start() {
    let app = app();
    get(&app, "/set-pending").await;
    get(&app, "/set-pending").await;

    for run in 0..3 {
        let body = start_body(
            &format!("http://shop.test/ok?run={run}"),
            &format!("http://shop.test/ko?run={run}"),
            vec![line_item("p", json!(1), "EUR")],
        );
        start_payment(&app, &body, None).await;
    }

    let states: Vec<PayoutState> = {
        let mut states = Vec::new();
        for _ in 0..3 {
            let target = location(&get(&app, "/checkin").await);
            states.push(decode_assertion(&target).payout_list[0].state);
        }
        states
    };
    assert_eq!(
        states,
        vec![
            PayoutState::Pending,
            PayoutState::Processed,
            PayoutState::Processed
        ]
    );
}

#[tokio::test]
async fn test_bad_checkins_drain_cancellations_in_order() {
    let app = app();
    for run in 0..2 {
        let body = start_body(
            &format!("http://shop.test/ok?run={run}"),
            &format!("http://shop.test/ko?run={run}"),
            vec![],
        );
        start_payment(&app, &body, Some("t")).await;
    }

    assert_eq!(
        location(&get(&app, "/bad-checkin").await),
        "http://shop.test/ko?run=0&token=t"
    );
    assert_eq!(
        location(&get(&app, "/bad-checkin").await),
        "http://shop.test/ko?run=1&token=t"
    );
    assert_eq!(
        get(&app, "/bad-checkin").await.status(),
        StatusCode::NOT_FOUND
    );

    // Success entries are untouched by bad checkins
    assert!(location(&get(&app, "/checkin").await).starts_with("http://shop.test/ok?run=0"));
    assert!(location(&get(&app, "/checkin").await).starts_with("http://shop.test/ok?run=1"));
}
