//! Dashboard page.
//!
//! `GET /` renders the latest reading and its full classification bundle as a
//! self-contained HTML page. The chart polls `/data` and the questionnaire
//! form posts to `/questionnaire` from the browser.

use axum::{extract::State, response::Html, routing::get, Router};
use tracing::debug;

use super::AppState;
use crate::WaterReport;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/", get(handler))
}

async fn handler(State((store, _config)): State<AppState>) -> Html<String> {
    // ---
    let latest = store.fetch_latest().await;
    debug!("GET / - latest reading: {:?}", latest);

    let report = WaterReport::build(
        latest.as_ref(),
        store.is_connected(),
        &mut rand::thread_rng(),
    );
    Html(render_page(&report))
}

/// Escape text for use in HTML element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect()
}

fn render_page(report: &WaterReport) -> String {
    // ---
    let quality = &report.quality;

    let reading = if report.has_data {
        format!(
            r#"<div class="metric"><span>TDS</span><strong>{:.1} ppm</strong></div>
<div class="metric"><span>Temperature</span><strong>{:.1} &deg;C</strong></div>
<p class="muted">Recorded {}</p>"#,
            report.tds,
            report.temperature,
            escape(report.timestamp.as_deref().unwrap_or("-")),
        )
    } else {
        r#"<p class="muted">No readings yet. Connect a sensor or post to <code>/sensor_data</code>.</p>"#
            .to_string()
    };

    let store_status = if report.store_connected {
        r#"<span class="badge ok">Datastore connected</span>"#
    } else {
        r#"<span class="badge off">Datastore disconnected</span>"#
    };

    let parameters: String = report
        .parameters
        .display_rows()
        .iter()
        .map(|(label, value)| format!("<tr><th>{}</th><td>{}</td></tr>", label, escape(value)))
        .collect();

    let standards: String = report
        .standards
        .iter()
        .map(|standard| {
            let rows: String = standard
                .limits
                .iter()
                .map(|l| {
                    format!(
                        "<tr><th>{}</th><td>{}</td></tr>",
                        escape(l.parameter),
                        escape(l.limit)
                    )
                })
                .collect();
            format!(
                "<div class=\"card\"><h3>{}</h3><table>{}</table></div>",
                escape(standard.name),
                rows
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Water Quality Dashboard</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<style>
body {{ font-family: system-ui, sans-serif; margin: 0; background: #f4f7fb; color: #1d2733; }}
header {{ background: #0b5394; color: #fff; padding: 1rem 2rem; display: flex; justify-content: space-between; align-items: center; }}
main {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 1rem; padding: 1rem 2rem; }}
.card {{ background: #fff; border-radius: 8px; padding: 1rem 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,.12); }}
.metric {{ display: flex; justify-content: space-between; font-size: 1.2rem; margin: .4rem 0; }}
.muted {{ color: #6b7785; font-size: .9rem; }}
.badge {{ padding: .25rem .6rem; border-radius: 999px; font-size: .85rem; }}
.badge.ok {{ background: #2e7d32; }} .badge.off {{ background: #b71c1c; }}
.tier {{ font-size: 1.5rem; font-weight: 700; }}
.no-data {{ color: #6b7785; }} .ultra-pure {{ color: #0277bd; }} .excellent {{ color: #2e7d32; }}
.good {{ color: #558b2f; }} .fair {{ color: #f9a825; }} .poor {{ color: #ef6c00; }}
.unacceptable {{ color: #c62828; }} .hazardous {{ color: #6a1b9a; }}
th {{ text-align: left; padding-right: 1rem; font-weight: 500; }}
</style>
</head>
<body>
<header><h1>Water Quality Dashboard</h1>{store_status}</header>
<main>
<section class="card"><h2>Latest reading</h2>{reading}</section>
<section class="card">
<h2>Quality</h2>
<p class="tier {class}">{level}</p>
<p>{description}</p>
<table>
<tr><th>Drinking safety</th><td>{drinking_safety}</td></tr>
<tr><th>Health impact</th><td>{health_impact}</td></tr>
<tr><th>Usage</th><td>{usage}</td></tr>
<tr><th>Risk level</th><td>{risk_level}</td></tr>
</table>
</section>
<section class="card"><h2>Temperature advisories</h2><ul>{advisories}</ul></section>
<section class="card"><h2>Suggestions</h2><ul>{suggestions}</ul></section>
<section class="card">
<h2>Other parameters</h2>
<table>{parameters}</table>
<p class="muted">Simulated estimates derived from TDS, not measured values.</p>
</section>
<section class="card"><h2>Live readings</h2><canvas id="chart"></canvas></section>
<section class="card">
<h2>Water habits questionnaire</h2>
<form id="questionnaire">
<label>Source <select name="source"><option value="municipal">Municipal</option><option value="filtered">Filtered</option><option value="bottled">Bottled</option><option value="well">Well</option></select></label><br>
<label>Changes in taste or colour <select name="change"><option value="no">No</option><option value="slight">Slight</option><option value="noticeable">Noticeable</option><option value="significant">Significant</option></select></label><br>
<label>Last tested <select name="test"><option value="3months">Within 3 months</option><option value="6months">Within 6 months</option><option value="1year">Within a year</option><option value="never">Never</option></select></label><br>
<label>Filtration <select name="filter"><option value="ro">RO</option><option value="uv">UV</option><option value="carbon">Carbon</option><option value="none">None</option></select></label><br>
<button type="submit">Score</button>
</form>
<div id="questionnaire-result"></div>
</section>
</main>
<main>{standards}</main>
<script>
const chart = new Chart(document.getElementById('chart'), {{
  type: 'line',
  data: {{ labels: [], datasets: [
    {{ label: 'TDS (ppm)', data: [], borderColor: '#0b5394', yAxisID: 'y' }},
    {{ label: 'Temperature (°C)', data: [], borderColor: '#e65100', yAxisID: 'y1' }}
  ] }},
  options: {{ scales: {{ y: {{ position: 'left' }}, y1: {{ position: 'right', grid: {{ drawOnChartArea: false }} }} }} }}
}});
async function refresh() {{
  const response = await fetch('/data');
  if (!response.ok) return;
  const points = await response.json();
  chart.data.labels = points.map(p => p.timestamp);
  chart.data.datasets[0].data = points.map(p => p.tds);
  chart.data.datasets[1].data = points.map(p => p.temperature);
  chart.update();
}}
refresh();
setInterval(refresh, 10000);
document.getElementById('questionnaire').addEventListener('submit', async (event) => {{
  event.preventDefault();
  const answers = Object.fromEntries(new FormData(event.target));
  const response = await fetch('/questionnaire', {{
    method: 'POST', headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify(answers)
  }});
  const result = await response.json();
  const out = document.getElementById('questionnaire-result');
  out.replaceChildren();
  const heading = document.createElement('p');
  heading.textContent = result.success ? `Score: ${{result.score}} / 130` : result.error;
  out.appendChild(heading);
  const items = document.createElement('ul');
  for (const text of result.recommendations || []) {{
    const li = document.createElement('li');
    li.textContent = text;
    items.appendChild(li);
  }}
  out.appendChild(items);
}});
</script>
</body>
</html>
"#,
        store_status = store_status,
        reading = reading,
        class = escape(quality.class),
        level = escape(quality.level.name()),
        description = escape(quality.description),
        drinking_safety = escape(quality.drinking_safety),
        health_impact = escape(quality.health_impact),
        usage = escape(quality.usage),
        risk_level = escape(quality.risk_level.name()),
        advisories = list(report.temperature_advisories),
        suggestions = list(&report.improvement_suggestions),
        parameters = parameters,
        standards = standards,
    )
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::Reading;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_escape() {
        // ---
        assert_eq!(
            escape(r#"<b>"TDS" & 'pH'</b>"#),
            "&lt;b&gt;&quot;TDS&quot; &amp; &#39;pH&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_without_data() {
        // ---
        let report = WaterReport::build(None, false, &mut StdRng::seed_from_u64(3));
        let page = render_page(&report);
        assert!(page.contains("No Data"));
        assert!(page.contains("No readings yet"));
        assert!(page.contains("Datastore disconnected"));
        assert!(page.contains("<tr><th>pH</th><td>-</td></tr>"));
    }

    #[test]
    fn test_page_with_reading() {
        // ---
        let reading = Reading {
            timestamp: "2025-06-01T10:00:00".to_string(),
            tds: 120.0,
            temperature: 18.0,
        };
        let report = WaterReport::build(Some(&reading), true, &mut StdRng::seed_from_u64(3));
        let page = render_page(&report);
        assert!(page.contains(r#"<p class="tier excellent">Excellent</p>"#));
        assert!(page.contains("120.0 ppm"));
        assert!(page.contains("Room temperature - ideal for drinking"));
        assert!(page.contains("WHO Standards"));
        assert!(page.contains("Datastore connected"));
    }
}
