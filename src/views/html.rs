use itertools::Itertools;

use crate::dataset::Municipality;
use crate::state::{AppState, Form, Status, StatusKind};
use crate::views::escape::escape_html;
use crate::views::{detail, dropdown, flat_municipalities, master_list, region_overview, DetailView, ListView, MunicipalityRow, RegionRow};

fn empty(text: &str) -> String {
    format!("<div class=\"empty\">{}</div>", escape_html(text))
}

fn failed(message: &str) -> String {
    empty(format!("ERROR: {}", message).as_str())
}

fn item(class: &str, attributes: &str, title: &str, meta: &str, badge: &str) -> String {
    format!(
        "<div class=\"{}\"{}><div class=\"left\"><div class=\"title\">{}</div><div class=\"meta\">{}</div></div><span class=\"badge\">{}</span></div>",
        class, attributes, title, meta, badge
    )
}

fn render_list<T>(view: &ListView<T>, empty_text: &str, row: impl Fn(&T) -> String) -> String {
    match view {
        ListView::Rows(rows) => rows.iter().map(row).join("\n"),
        ListView::Empty => empty(empty_text),
        ListView::Failed(message) => failed(message)
    }
}

fn region_title(code: &str, name: &str) -> String {
    format!("{} — {}", escape_html(code), escape_html(name))
}

fn master_row(row: &RegionRow<'_>) -> String {
    item(
        "item clickable",
        format!(" data-region=\"{}\"", escape_html(row.code)).as_str(),
        region_title(row.code, row.name).as_str(),
        escape_html(row.href).as_str(),
        format!("{} municipalities", row.municipality_count).as_str()
    )
}

fn overview_row(row: &RegionRow<'_>) -> String {
    item(
        "item",
        "",
        region_title(row.code, row.name).as_str(),
        escape_html(row.href).as_str(),
        row.municipality_count.to_string().as_str()
    )
}

fn flat_row(row: &MunicipalityRow<'_>) -> String {
    item(
        "item",
        "",
        region_title(&row.municipality.code, &row.municipality.name).as_str(),
        format!("Region: {}", region_title(row.region_code, row.region_name)).as_str(),
        "municipality"
    )
}

fn detail_row(municipality: &Municipality) -> String {
    let mut meta = escape_html(&municipality.href);
    if !municipality.photo_href.is_empty() {
        meta.push_str(" • ");
        meta.push_str(&escape_html(&municipality.photo_href));
    }

    item(
        "item",
        "",
        region_title(&municipality.code, &municipality.name).as_str(),
        meta.as_str(),
        escape_html(&municipality.code).as_str()
    )
}

pub fn render_master_list(state: &AppState) -> String {
    render_list(&master_list(state), "No regions in the database.", master_row)
}

pub fn render_region_overview(state: &AppState) -> String {
    render_list(&region_overview(state), "No regions.", overview_row)
}

pub fn render_flat_municipalities(state: &AppState) -> String {
    render_list(&flat_municipalities(state), "No municipalities.", flat_row)
}

/// Renders the heading line and the list of the detail panel.
pub fn render_detail(state: &AppState) -> (String, String) {
    match detail(state) {
        DetailView::NoSelection => (
            escape_html("Choose a region in the dropdown to see its municipalities."),
            empty("No region selected.")
        ),
        DetailView::NotFound { code } => (
            escape_html(format!("Region {} was not found.", code).as_str()),
            empty("Region not found.")
        ),
        DetailView::Region { code, name, municipalities } => {
            let heading = escape_html(format!("Selected region: {} — {}", code, name).trim());
            let body = if municipalities.is_empty() {
                empty("No municipalities in this region yet.")
            } else {
                municipalities.iter().map(detail_row).join("\n")
            };
            (heading, body)
        }
        DetailView::Failed(message) => (String::new(), failed(&message))
    }
}

pub fn render_dropdown(state: &AppState) -> String {
    let options = dropdown(state);
    let placeholder_selected = if options.iter().any(|o| o.selected) { "" } else { " selected" };

    let mut html = format!("<select id=\"regionSelect\"><option value=\"\"{}>Choose region</option>", placeholder_selected);
    for option in &options {
        html.push_str(format!(
            "<option value=\"{}\"{}>{}</option>",
            escape_html(option.value),
            if option.selected { " selected" } else { "" },
            escape_html(&option.label)
        ).as_str());
    }
    html.push_str("</select>");
    html
}

fn render_status(id: &str, status: &Status) -> String {
    let class = match status.kind {
        StatusKind::Ok => "toast ok",
        StatusKind::Error => "toast err",
        StatusKind::Idle | StatusKind::Pending => "toast"
    };
    format!("<div id=\"{}\" class=\"{}\">{}</div>", id, class, escape_html(&status.message))
}

fn input(id: &str, value: &str) -> String {
    format!("<input id=\"{}\" value=\"{}\">", id, escape_html(value))
}

/// Assembles the whole page from the current state.
pub fn render_page(state: &AppState) -> String {
    let (detail_heading, detail_body) = render_detail(state);
    let region_form = state.region_form();
    let municipality_form = state.municipality_form();
    let fetched_at = state.snapshot()
        .map(|s| s.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default();

    [
        "<!DOCTYPE html>".to_string(),
        "<html><head><meta charset=\"utf-8\"><title>Regions and municipalities</title></head><body>".to_string(),
        "<section id=\"createRegion\">".to_string(),
        input("regionKode", &region_form.code),
        input("regionNavn", &region_form.name),
        input("regionHref", &region_form.href),
        render_status("toastRegion", state.status(Form::Region)),
        "</section>".to_string(),
        "<section id=\"createKommune\">".to_string(),
        input("kommuneKode", &municipality_form.code),
        input("kommuneNavn", &municipality_form.name),
        input("kommuneHref", &municipality_form.href),
        input("kommuneHrefPhoto", &municipality_form.photo_href),
        render_dropdown(state),
        render_status("toastKommune", state.status(Form::Municipality)),
        "</section>".to_string(),
        format!("<section id=\"regionList\">{}</section>", render_master_list(state)),
        format!("<section id=\"selected\"><div id=\"selectedRegionText\">{}</div><div id=\"kommuneList\">{}</div></section>", detail_heading, detail_body),
        format!("<section id=\"allRegions\">{}</section>", render_region_overview(state)),
        format!("<section id=\"allKommuner\">{}</section>", render_flat_municipalities(state)),
        format!("<footer>{}</footer>", escape_html(&fetched_at)),
        "</body></html>".to_string()
    ].join("\n")
}
