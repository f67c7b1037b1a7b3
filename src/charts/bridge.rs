//! Thin interop layer handing chart data to the external charting library.
//!
//! The library registers `window.renderLineChart`, `window.renderBarChart`
//! and `window.renderPieChart` globals taking a container id, a JSON data
//! blob and a title. Calls poll briefly until the renderer and the target
//! container exist, since results render right after a reactive update.

use super::ChartData;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('chart call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

fn render(renderer: &str, container_id: &str, data: &ChartData, title: &str) {
    let json = match serde_json::to_string(data) {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to serialize chart data: {}", e);
            return;
        }
    };
    let escaped_data = json.replace('\\', "\\\\").replace('\'', "\\'");
    let escaped_title = title.replace('\\', "\\\\").replace('\'', "\\'");
    call_js(&format!(
        r#"
        (function() {{
            var tries = 0;
            var poll = setInterval(function() {{
                if (typeof window.{renderer} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{renderer}('{container_id}', '{escaped_data}', '{escaped_title}');
                    }} catch(e) {{ console.error('{renderer} error:', e); }}
                }} else if (++tries > 50) {{
                    clearInterval(poll);
                }}
            }}, 100);
        }})();
        "#,
    ));
}

pub fn render_line_chart(container_id: &str, data: &ChartData, title: &str) {
    render("renderLineChart", container_id, data, title);
}

pub fn render_bar_chart(container_id: &str, data: &ChartData, title: &str) {
    render("renderBarChart", container_id, data, title);
}

pub fn render_pie_chart(container_id: &str, data: &ChartData, title: &str) {
    render("renderPieChart", container_id, data, title);
}

/// Clear a chart container
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}
