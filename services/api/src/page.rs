//! Server-rendered dashboard page.
//!
//! The cards are rendered in Rust; chart data is embedded as JSON and drawn as
//! inline SVG by a small script. Changing the department dropdown calls the
//! selection route and redraws only the histogram.

use promotion_dashboard::report::views::{
    HireSeriesView, PromotionChartView, ServiceHistogramView,
};
use promotion_dashboard::report::Dashboard;
use serde::Serialize;

const PAGE_TITLE: &str = "Dashboard Employee Promotion";
const BRAND: &str = "Employee Promotion Dashboard";
const INFORMATION: &str = "This is the information of employees in our Start-Up. It helps to identify who is a potential candidate for promotion.";

#[derive(Serialize)]
struct ChartData<'a> {
    promotions: &'a PromotionChartView,
    hires: &'a HireSeriesView,
    selection: ServiceHistogramView,
}

pub(crate) fn render_dashboard(dashboard: &Dashboard) -> Result<String, serde_json::Error> {
    let summary = dashboard.summary();
    let data = ChartData {
        promotions: dashboard.promotions(),
        hires: dashboard.hires(),
        selection: dashboard.select(None),
    };
    // Keep "</script>" sequences inside the payload from closing the tag.
    let data = serde_json::to_string(&data)?.replace("</", "<\\/");

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <nav class="navbar"><span class="brand">{brand}</span><a href="#">Page 1</a></nav>
    <main>
        <section class="row">
            <div class="card info"><h3>Information</h3><p>{information}</p></div>
            <div class="card employees"><h3>Total Employee</h3><h1 id="total-employees">{total}</h1></div>
            <div class="card promoted"><h3>Number of employees promoted</h3><h1 id="total-promoted">{promoted}</h1></div>
        </section>
        <section class="row">
            <div class="panel">
                <div class="tabs">
                    <button class="tab active" data-target="department-chart">Each Department</button>
                    <button class="tab" data-target="hire-chart">New Hire</button>
                </div>
                <div id="department-chart" class="chart"></div>
                <div id="hire-chart" class="chart hidden"></div>
            </div>
            <div class="panel">
                <select id="choose-dept">{options}</select>
                <div id="service-chart" class="chart"></div>
            </div>
        </section>
    </main>
    <script id="chart-data" type="application/json">{data}</script>
    <script>{js}</script>
</body>
</html>"##,
        title = PAGE_TITLE,
        css = inline_css(),
        brand = BRAND,
        information = INFORMATION,
        total = summary.total_employees,
        promoted = summary.total_promoted,
        options = department_options(dashboard),
        data = data,
        js = inline_javascript(),
    ))
}

fn department_options(dashboard: &Dashboard) -> String {
    let selected = dashboard.default_department();
    dashboard
        .departments()
        .departments
        .iter()
        .map(|department| {
            let marker = if Some(department.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            let escaped = html_escape(department);
            format!(r#"<option value="{escaped}"{marker}>{escaped}</option>"#)
        })
        .collect()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; font-family: "Helvetica Neue", Arial, sans-serif; background: #f4f4f4; color: #222; }
.navbar { display: flex; justify-content: space-between; align-items: center; background: #000; color: #fff; padding: 16px 32px; }
.navbar a { color: #ccc; text-decoration: none; }
.brand { font-size: 1.2em; letter-spacing: 0.15em; text-transform: uppercase; }
main { padding: 24px 32px; }
.row { display: flex; gap: 24px; margin-bottom: 24px; }
.card { padding: 16px; border-radius: 4px; }
.card h3 { margin: 0 0 8px; font-size: 0.9em; text-transform: uppercase; }
.info { flex: 2; background: #fefbd8; }
.employees { flex: 1; background: #80ced6; }
.promoted { flex: 1; background: #d5f4e6; }
.promoted h1 { color: red; }
.panel { flex: 1; background: #fff; padding: 16px; border-radius: 4px; }
.tabs { display: flex; gap: 8px; margin-bottom: 8px; }
.tab { border: none; background: #eee; padding: 8px 16px; cursor: pointer; }
.tab.active { background: #618685; color: #fff; }
.chart.hidden { display: none; }
.chart svg { width: 100%; height: auto; }
select { width: 100%; padding: 8px; margin-bottom: 8px; }
.empty { fill: #888; font-size: 14px; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function() {
    const COLORS = ['#618685', '#80ced6'];
    const data = JSON.parse(document.getElementById('chart-data').textContent);

    function el(name, attrs, text) {
        const node = document.createElementNS('http://www.w3.org/2000/svg', name);
        Object.entries(attrs).forEach(([k, v]) => node.setAttribute(k, v));
        if (text !== undefined) node.textContent = text;
        return node;
    }

    function frame(container, title, width, height) {
        container.innerHTML = '';
        const svg = el('svg', { viewBox: `0 0 ${width} ${height}` });
        svg.appendChild(el('text', { x: 10, y: 24, 'font-size': 18 }, title));
        container.appendChild(svg);
        return svg;
    }

    function empty(svg, width, height) {
        svg.appendChild(el('text', { x: width / 2, y: height / 2, 'text-anchor': 'middle', class: 'empty' }, 'No data'));
    }

    function drawPromotions(view) {
        const width = 640, height = 700, left = 160, top = 50, bottom = 40;
        const svg = frame(document.getElementById('department-chart'), view.title, width, height);
        if (view.counts.length === 0) return empty(svg, width, height);

        const departments = [...new Set(view.counts.map(c => c.department))];
        const labels = [...new Set(view.counts.map(c => c.is_promoted))];
        const max = Math.max(...view.counts.map(c => c.employees));
        const band = (height - top - bottom) / departments.length;
        const bar = band * 0.8 / labels.length;

        departments.forEach((dept, i) => {
            const y = top + i * band;
            svg.appendChild(el('text', { x: left - 8, y: y + band / 2, 'text-anchor': 'end', 'font-size': 12 }, dept));
            labels.forEach((label, j) => {
                const entry = view.counts.find(c => c.department === dept && c.is_promoted === label);
                if (!entry) return;
                const w = (width - left - 20) * entry.employees / max;
                const rect = el('rect', { x: left, y: y + band * 0.1 + j * bar, width: w, height: bar, fill: COLORS[j % COLORS.length] });
                rect.appendChild(el('title', {}, `${dept} / Is Promoted? ${label}: ${entry.employees}`));
                svg.appendChild(rect);
            });
        });
        svg.appendChild(el('text', { x: (width + left) / 2, y: height - 10, 'text-anchor': 'middle', 'font-size': 12 }, 'No of Employee'));
    }

    function drawHires(view) {
        const width = 640, height = 700, left = 50, top = 50, bottom = 60;
        const svg = frame(document.getElementById('hire-chart'), view.title, width, height);
        if (view.entries.length === 0) return empty(svg, width, height);

        const max = Math.max(...view.entries.map(e => e.employees));
        const step = view.entries.length > 1 ? (width - left - 20) / (view.entries.length - 1) : 0;
        const points = view.entries.map((e, i) => [left + i * step, height - bottom - (height - top - bottom) * e.employees / max]);
        svg.appendChild(el('polyline', { points: points.map(p => p.join(',')).join(' '), fill: 'none', stroke: COLORS[0], 'stroke-width': 2 }));
        points.forEach(([x, y], i) => {
            const dot = el('circle', { cx: x, cy: y, r: 4, fill: COLORS[0] });
            dot.appendChild(el('title', {}, `${view.entries[i].join_date}: ${view.entries[i].employees}`));
            svg.appendChild(dot);
        });
        svg.appendChild(el('text', { x: width / 2, y: height - 10, 'text-anchor': 'middle', 'font-size': 12 }, 'Join date'));
    }

    function drawHistogram(view) {
        const width = 640, height = 700, left = 50, top = 140, bottom = 60;
        const svg = frame(document.getElementById('service-chart'), view.title, width, height);
        if (view.bins.length === 0) return empty(svg, width, height);

        const lo = view.bins[0].lower, hi = view.bins[view.bins.length - 1].upper;
        const scale = v => left + (width - left - 20) * (v - lo) / (hi - lo);
        const max = Math.max(...view.bins.map(b => b.count));
        view.bins.forEach(b => {
            const h = (height - top - bottom) * b.count / max;
            const rect = el('rect', { x: scale(b.lower), y: height - bottom - h, width: Math.max(scale(b.upper) - scale(b.lower) - 1, 1), height: h, fill: COLORS[0] });
            rect.appendChild(el('title', {}, `${b.lower.toFixed(1)} - ${b.upper.toFixed(1)}: ${b.count}`));
            svg.appendChild(rect);
        });

        const box = view.box_plot;
        if (box) {
            const y = 80;
            svg.appendChild(el('line', { x1: scale(box.min), x2: scale(box.max), y1: y, y2: y, stroke: COLORS[0] }));
            svg.appendChild(el('rect', { x: scale(box.q1), y: y - 15, width: Math.max(scale(box.q3) - scale(box.q1), 1), height: 30, fill: COLORS[1], stroke: COLORS[0] }));
            svg.appendChild(el('line', { x1: scale(box.median), x2: scale(box.median), y1: y - 15, y2: y + 15, stroke: COLORS[0], 'stroke-width': 2 }));
        }
        svg.appendChild(el('text', { x: width / 2, y: height - 10, 'text-anchor': 'middle', 'font-size': 12 }, 'Length of Service (years)'));
    }

    document.querySelectorAll('.tab').forEach(tab => {
        tab.addEventListener('click', () => {
            document.querySelectorAll('.tab').forEach(t => t.classList.remove('active'));
            document.querySelectorAll('.panel .chart[id$="-chart"]').forEach(c => {
                if (c.id !== 'service-chart') c.classList.add('hidden');
            });
            tab.classList.add('active');
            document.getElementById(tab.dataset.target).classList.remove('hidden');
        });
    });

    document.getElementById('choose-dept').addEventListener('change', event => {
        const department = encodeURIComponent(event.target.value);
        fetch(`/api/v1/dashboard/service-distribution?department=${department}`)
            .then(response => response.json())
            .then(drawHistogram);
    });

    drawPromotions(data.promotions);
    drawHires(data.hires);
    drawHistogram(data.selection);
})();
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use promotion_dashboard::dataset::DatasetLoader;
    use promotion_dashboard::report::DashboardSettings;
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        let csv = "employee_id,department,region,education,gender,recruitment_channel,date_of_birth,join_date,length_of_service,KPIs_met >80%,awards_won?,is_promoted\n\
1,R&D,region_1,Bachelor's,m,other,1990-01-01,2020-02-01,1,Yes,No,Yes\n\
2,Technology,region_1,Bachelor's,f,other,1990-01-01,2020-02-03,5,No,No,No\n";
        let dataset = DatasetLoader::new()
            .as_of(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"))
            .load_reader(csv.as_bytes())
            .expect("dataset loads");
        Dashboard::build(Arc::new(dataset), DashboardSettings::default())
    }

    #[test]
    fn page_renders_cards_and_dropdown() {
        let html = render_dashboard(&dashboard()).expect("page renders");
        assert!(html.contains("<title>Dashboard Employee Promotion</title>"));
        assert!(html.contains(r#"<h1 id="total-employees">2</h1>"#));
        assert!(html.contains(r#"<h1 id="total-promoted">1</h1>"#));
        assert!(html.contains(r#"<option value="R&amp;D">R&amp;D</option>"#));
        assert!(html.contains(r#"<option value="Technology" selected>Technology</option>"#));
        assert!(html.contains("Length of Service Distribution in Technology Department"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b>"HR" & 'Ops'</b>"#),
            "&lt;b&gt;&quot;HR&quot; &amp; &#39;Ops&#39;&lt;/b&gt;"
        );
    }
}
