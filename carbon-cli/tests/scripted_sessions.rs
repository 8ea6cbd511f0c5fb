//! End-to-end sessions: scripted keyboard input against the in-memory
//! gateway, checking both what was shown and what reached the backend.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use carbon_cli::app::App;
use carbon_cli::console::ScriptedConsole;
use carbon_core::gateway::fixture::{Call, FixtureGateway};
use carbon_core::i18n::{Locale, Translator};
use carbon_core::router::Route;
use carbon_core::{
    CalculationResult, DietHabit, GatewayError, HistoryEntry, QuickAnswers, RegionQuery,
    RegionalStats, SessionStatus, ShoppingLevel, User, Vehicle,
};

fn alice() -> User {
    User {
        username: "alice".to_string(),
        full_name: Some("Alice Chen".to_string()),
    }
}

fn logged_in(gateway: &FixtureGateway) {
    gateway.push_session(Ok(SessionStatus {
        is_logged_in: true,
        user: Some(alice()),
    }));
}

fn five_hundred() -> CalculationResult {
    CalculationResult {
        total: dec!(500),
        breakdown: BTreeMap::from([
            ("transport".to_string(), dec!(50)),
            ("diet".to_string(), dec!(200)),
            ("consumption".to_string(), dec!(250)),
        ]),
        top_source: Some("consumption".to_string()),
        suggestion: None,
    }
}

/// Runs a session from `start` and hands back the console for inspection.
async fn run(
    gateway: &FixtureGateway,
    start: &str,
    input: &[&str],
) -> ScriptedConsole {
    let console = ScriptedConsole::new(input.iter().copied());
    let mut app = App::new(gateway, console, Translator::new(Locale::En));
    app.run(Route::from_path(start)).await.unwrap();
    app.into_console()
}

#[tokio::test]
async fn login_quick_estimate_and_logout() {
    let gateway = FixtureGateway::new();
    gateway.push_login(Ok(alice()));
    gateway.push_quick(Ok(five_hundred()));

    let console = run(
        &gateway,
        "/",
        &[
            "1", "1", "alice", "secret", // landing -> modal -> fill
            "1", "6", "4", "1", "1", // dashboard -> quick: bike, vegetarian, low -> submit
            "2", // back to dashboard
            "6", // log out
            "2", // quit from landing
        ],
    )
    .await;

    assert_eq!(
        gateway.calls(),
        vec![
            Call::Session,
            Call::Login {
                username: "alice".to_string()
            },
            Call::Quick(QuickAnswers {
                commute: Vehicle::Bike,
                diet: DietHabit::Vegetarian,
                shopping: ShoppingLevel::Low,
            }),
            Call::Logout,
        ]
    );
    assert!(console.contains("Welcome, Alice Chen!"));
    assert!(console.contains("Hello, Alice Chen!"));
    assert!(console.contains("Total: 500 kg CO2e"));
    assert!(console.contains("Largest source: Consumption"));
    assert!(console.contains("You have been logged out."));
    assert_eq!(console.transcript().last().map(String::as_str), Some("Goodbye, and keep it green!"));
    assert_eq!(console.remaining(), 0);
}

#[tokio::test]
async fn protected_route_redirects_anonymous_user_to_landing() {
    let gateway = FixtureGateway::new();

    let console = run(&gateway, "/history", &["2"]).await;

    assert_eq!(gateway.calls(), vec![Call::Session]);
    assert!(console.contains("== Carbon Footprint Estimator =="));
    assert!(!console.contains("== History =="));
}

#[tokio::test]
async fn resumed_session_skips_landing() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);

    let console = run(&gateway, "/", &["7"]).await;

    assert!(console.contains("== Dashboard =="));
    assert!(!console.contains("== Carbon Footprint Estimator =="));
}

#[tokio::test]
async fn failed_login_stays_in_modal_with_error() {
    let gateway = FixtureGateway::new();
    gateway.push_login(Err(GatewayError::Unauthorized("Invalid credentials".to_string())));

    let console = run(&gateway, "/", &["1", "1", "alice", "wrong", "3", "2"]).await;

    assert!(console.contains("Error: Invalid credentials"));
    assert!(!console.contains("== Dashboard =="));
    assert_eq!(console.remaining(), 0);
}

#[tokio::test]
async fn registration_switches_back_to_login_with_notice() {
    let gateway = FixtureGateway::new();
    gateway.push_register(Ok(carbon_core::gateway::Registration {
        message: Some("Registered, please log in".to_string()),
    }));

    let console = run(
        &gateway,
        "/",
        &[
            "1", "2", "1", // landing -> modal -> register -> fill
            "bob", "pw", "bob@example.com", "Bob", "", "2000-01-01", "臺北市", "", "",
            "3", "2", // cancel, quit
        ],
    )
    .await;

    let registered = gateway.calls().into_iter().find_map(|call| match call {
        Call::Register(fields) => Some(fields),
        _ => None,
    });
    let fields = registered.expect("register call");
    assert_eq!(fields.username, "bob");
    assert_eq!(fields.city, "臺北市");
    assert_eq!(fields.district, "中正區");
    assert!(console.contains("* Registered, please log in"));
    assert!(console.contains("== Log in =="));
}

#[tokio::test]
async fn quick_estimate_can_be_retried_after_failure() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);
    gateway.push_quick(Err(GatewayError::Rejected {
        status: 500,
        message: "backend down".to_string(),
    }));
    gateway.push_quick(Ok(five_hundred()));

    let console = run(
        &gateway,
        "/quick-estimate",
        &["6", "4", "1", "1", "1", "2", "7"],
    )
    .await;

    assert!(console.contains("Calculation failed: backend down"));
    assert!(console.contains("Total: 500 kg CO2e"));
    let quick_calls = gateway
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Quick(_)))
        .count();
    assert_eq!(quick_calls, 2);
}

#[tokio::test]
async fn detailed_analysis_walks_five_steps() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);
    gateway.push_detailed(Ok(five_hundred()));

    let console = run(
        &gateway,
        "/detailed-analysis",
        &[
            "200", "10", "5", "1", // energy
            "5", "120", "1", // transport: public, 120 km
            "1", "2", "3", "1", // diet
            "2,000", "0", "1", // consumption
            "3", "4", "1", // waste -> submit
            "2", "7",
        ],
    )
    .await;

    let answers = gateway
        .calls()
        .into_iter()
        .find_map(|call| match call {
            Call::Detailed(answers) => Some(answers),
            _ => None,
        })
        .expect("detailed call");
    assert_eq!(answers.energy.electricity, dec!(200));
    assert_eq!(answers.transport.vehicle, Vehicle::Public);
    assert_eq!(answers.transport.km, dec!(120));
    assert_eq!(answers.diet.grain, dec!(3));
    assert_eq!(answers.consumption.clothes, dec!(2000));
    assert_eq!(answers.waste.recycle, dec!(4));
    assert!(console.contains("Step 1 of 5: Home energy"));
    assert!(console.contains("Step 5 of 5: Waste"));
    assert!(console.contains("Total: 500 kg CO2e"));
}

#[tokio::test]
async fn detailed_analysis_back_keeps_answers() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);

    let console = run(
        &gateway,
        "/detailed-analysis",
        &[
            "200", "10", "5", "1", // energy -> next
            "1", "120", "2", // transport -> back
            "7", "", "", // energy again
            "3", "7", // dashboard, quit
        ],
    )
    .await;

    // Returning to step one offers the values entered before.
    assert!(console.contains("Electricity per month (kWh) [200]: 7"));
    assert!(gateway.calls().iter().all(|c| !matches!(c, Call::Detailed(_))));
}

#[tokio::test]
async fn quiz_with_every_answer_right() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);

    let console = run(
        &gateway,
        "/quiz",
        &["1", "2", "2", "1", "1", "3", "2", "3", "1", "3", "1", "2", "7"],
    )
    .await;

    assert!(console.contains("You scored 10 out of 10."));
    assert!(!console.contains("Not quite."));
    assert_eq!(gateway.calls(), vec![Call::Session]);
}

#[tokio::test]
async fn history_lists_entries() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);
    gateway.push_history(Ok(vec![HistoryEntry {
        id: Some(1),
        log_type: Some("quick".to_string()),
        total_carbon: dec!(321.5),
        breakdown: BTreeMap::from([("diet".to_string(), dec!(300))]),
        created_at: Some("Tue, 14 Jan 2025 08:30:00 GMT".to_string()),
    }]));

    let console = run(&gateway, "/history", &["1", "2", "7"]).await;

    assert!(console.contains("2025-01-14 08:30  Quick  321.5 kg"));
    // The refresh found nothing queued and reported it inline.
    assert!(console.contains("Could not load history:"));
}

#[tokio::test]
async fn regional_filters_narrow_the_query() {
    let gateway = FixtureGateway::new();
    logged_in(&gateway);
    for _ in 0..4 {
        gateway.push_regional(Ok(RegionalStats::default()));
    }

    let console = run(
        &gateway,
        "/regional-stats",
        &[
            "2", // district without a city
            "1", "10", // 高雄市
            "2", "2", // first district
            "4", "7",
        ],
    )
    .await;

    let queries: Vec<RegionQuery> = gateway
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Regional(query) => Some(query),
            _ => None,
        })
        .collect();
    assert_eq!(
        queries,
        vec![
            RegionQuery::default(),
            RegionQuery::default(),
            RegionQuery::new(Some("高雄市"), None),
            RegionQuery::new(Some("高雄市"), Some("新興區")),
        ]
    );
    assert!(console.contains("Choose a city first."));
    assert!(console.contains("Area: 高雄市 新興區"));
    assert!(console.contains("No data for this area yet."));
}
