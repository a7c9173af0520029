//! HTML analytics page.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use psyscore_core::category::{classify, ScoreDomain};
use psyscore_core::model::Participant;
use psyscore_core::report::AnalyticsReport;

use crate::write_export;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the analytics page for a report and the records behind it.
pub fn generate_html(report: &AnalyticsReport, participants: &[Participant]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>psyscore analytics (N = {})</title>\n",
        report.participant_count
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>psyscore analytics</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">N = {} | {}</p>\n",
        report.participant_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Descriptive statistics
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Statistik Deskriptif</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Domain</th><th>N</th><th>M</th><th>SD</th><th>Min</th><th>Max</th><th>Median</th><th>Q1</th><th>Q3</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for summary in &report.domains {
        match &summary.stats {
            Some(s) => {
                let s = s.rounded();
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    summary.domain, s.n, s.mean, s.sd, s.min, s.max, s.median, s.q1, s.q3
                ));
            }
            None => html.push_str(&format!(
                "<tr><td>{}</td><td>0</td><td colspan=\"7\">-</td></tr>\n",
                summary.domain
            )),
        }
    }
    html.push_str("</tbody></table>\n");

    html.push_str("<pre class=\"apa\">");
    html.push_str(&html_escape(&report.summary_text()));
    html.push_str("</pre>\n");
    html.push_str("</section>\n");

    // Data quality
    let q = &report.quality;
    html.push_str("<section class=\"quality\">\n");
    html.push_str("<h2>Kualitas Data</h2>\n");
    html.push_str("<table>\n<tbody>\n");
    for (label, count) in [
        ("Straight-lining", q.straight_lining),
        ("Terlalu cepat (&lt; 10 menit)", q.too_fast),
        ("Lambat (&gt; 60 menit)", q.slow),
        ("Tanpa waktu", q.untimed),
        ("Ditandai", q.flagged),
    ] {
        html.push_str(&format!("<tr><td>{label}</td><td>{count}</td></tr>\n"));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-participant results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Peserta</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">ID</th><th onclick=\"sortTable(1)\">Nama</th><th onclick=\"sortTable(2)\">Umur</th><th onclick=\"sortTable(3)\">Kognitif</th><th onclick=\"sortTable(4)\">Psikologis</th><th onclick=\"sortTable(5)\">Sosial</th><th onclick=\"sortTable(6)\">Memori</th><th onclick=\"sortTable(7)\">Kualitas</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for p in participants {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>",
            p.id,
            html_escape(&p.name),
            p.age
        ));
        for domain in ScoreDomain::ALL {
            let score = p.score(domain);
            let category = classify(domain, score);
            html.push_str(&format!(
                "<td class=\"{}\" title=\"{}\">{}</td>",
                category.color,
                category.category,
                score
            ));
        }
        let quality = p
            .response_quality
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!("<td>{quality}</td></tr>\n"));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the analytics page to a file.
pub fn write_html_report(
    report: &AnalyticsReport,
    participants: &[Participant],
    path: &Path,
) -> Result<()> {
    write_export(path, &generate_html(report, participants))
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --red: #fde2e2; --yellow: #fef9c3; --green: #dcfce7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --red: #7f1d1d; --yellow: #713f12; --green: #064e3b; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.red { background: var(--red); }
.yellow { background: var(--yellow); }
.green { background: var(--green); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
