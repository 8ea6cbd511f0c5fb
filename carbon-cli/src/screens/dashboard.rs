use anyhow::Result;

use carbon_core::router::Route;

use crate::app::{App, Nav};
use crate::console::Console;

const ENTRIES: [(&str, Route); 5] = [
    ("nav.quick", Route::QuickEstimate),
    ("nav.detailed", Route::DetailedAnalysis),
    ("nav.quiz", Route::Quiz),
    ("nav.history", Route::History),
    ("nav.regional", Route::RegionalStats),
];

pub async fn show<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    let name = app
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    app.heading("dashboard.title")?;
    app.say("dashboard.greeting", &[("name", &name)])?;

    let mut keys: Vec<&str> = ENTRIES.iter().map(|(key, _)| *key).collect();
    keys.extend(["nav.logout", "nav.quit"]);

    match app.choose_keys(&keys)? {
        Some(i) if i < ENTRIES.len() => Ok(Nav::To(ENTRIES[i].1)),
        Some(i) if i == ENTRIES.len() => app.logout().await,
        _ => Ok(Nav::Quit),
    }
}
