use anyhow::Result;
use tracing::warn;

use carbon_core::RegionQuery;
use carbon_core::options;
use carbon_core::router::Route;

use crate::app::{App, Nav};
use crate::console::Console;
use crate::render;

fn scope_label<C: Console>(
    app: &App<'_, C>,
    query: &RegionQuery,
) -> String {
    match (&query.city, &query.district) {
        (Some(city), Some(district)) => format!("{city} {district}"),
        (Some(city), None) => city.clone(),
        _ => app.t.t("regional.all"),
    }
}

/// Picks from `names` with an extra leading "all" entry. `Some(None)` clears
/// the filter; `None` means input ran out.
fn pick_area<C: Console>(
    app: &mut App<'_, C>,
    names: &[&'static str],
) -> Result<Option<Option<&'static str>>> {
    let mut entries = vec![app.t.t("regional.all")];
    entries.extend(names.iter().map(|n| n.to_string()));
    Ok(app
        .choose(&entries)?
        .map(|i| if i == 0 { None } else { Some(names[i - 1]) }))
}

/// Regional averages, optionally narrowed to a city and district.
pub async fn show<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    let mut query = RegionQuery::default();

    loop {
        app.heading("regional.title")?;
        let area = scope_label(app, &query);
        app.say("regional.scope", &[("area", &area)])?;

        match app.gateway.regional_stats(&query).await {
            Ok(stats) => {
                let lines = render::stats_lines(&app.t, &stats);
                app.lines(lines)?;
            }
            Err(err) => {
                warn!(error = %err, "regional stats failed");
                app.say("regional.error", &[("message", &err.user_message())])?;
            }
        }

        let menu = [
            "regional.pick_city",
            "regional.pick_district",
            "regional.clear",
            "nav.dashboard",
        ];
        match app.choose_keys(&menu)? {
            Some(0) => {
                let cities: Vec<&'static str> = options::cities().collect();
                let Some(city) = pick_area(app, &cities)? else {
                    return Ok(Nav::Quit);
                };
                query.set_city(city);
            }
            Some(1) => {
                let districts = query.city.as_deref().and_then(options::districts);
                let Some(districts) = districts else {
                    app.say("regional.need_city", &[])?;
                    continue;
                };
                let Some(district) = pick_area(app, districts)? else {
                    return Ok(Nav::Quit);
                };
                query.set_district(district);
            }
            Some(2) => query = RegionQuery::default(),
            Some(_) => return Ok(Nav::To(Route::Dashboard)),
            None => return Ok(Nav::Quit),
        }
    }
}
