pub mod escape;
pub mod html;

use crate::dataset::{Municipality, Region};
use crate::state::AppState;

/// A rendered list: either rows, an explicit "nothing here", or the load error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Rows(Vec<T>),
    Empty,
    Failed(String)
}

impl<T> ListView<T> {
    fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ListView::Rows(rows) => rows,
            _ => &[]
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListView::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub href: &'a str,
    pub municipality_count: usize
}

impl<'a> From<&'a Region> for RegionRow<'a> {
    fn from(region: &'a Region) -> Self {
        RegionRow {
            code: &region.code,
            name: &region.name,
            href: &region.href,
            municipality_count: region.municipality_count()
        }
    }
}

/// A municipality annotated with the region it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRow<'a> {
    pub municipality: &'a Municipality,
    pub region_code: &'a str,
    pub region_name: &'a str
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView<'a> {
    NoSelection,
    NotFound {
        code: &'a str
    },
    Region {
        code: &'a str,
        name: &'a str,
        municipalities: &'a [Municipality]
    },
    Failed(String)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption<'a> {
    pub value: &'a str,
    pub label: String,
    pub selected: bool
}

/// Master list: one clickable row per region, in received order.
pub fn master_list(state: &AppState) -> ListView<RegionRow<'_>> {
    region_rows(state)
}

/// Read-only overview of all regions. Same rows as the master list, without interaction.
pub fn region_overview(state: &AppState) -> ListView<RegionRow<'_>> {
    region_rows(state)
}

fn region_rows(state: &AppState) -> ListView<RegionRow<'_>> {
    if let Some(err) = state.load_error() {
        return ListView::Failed(err.to_string());
    }

    match state.snapshot() {
        Some(snapshot) => ListView::from_rows(snapshot.regions.iter().map(RegionRow::from).collect()),
        None => ListView::Empty
    }
}

/// Every municipality of every region, region order first, then municipality order.
pub fn flat_municipalities(state: &AppState) -> ListView<MunicipalityRow<'_>> {
    if let Some(err) = state.load_error() {
        return ListView::Failed(err.to_string());
    }

    let Some(snapshot) = state.snapshot() else {
        return ListView::Empty;
    };

    ListView::from_rows(snapshot.regions.iter()
        .flat_map(|region| {
            region.municipalities.iter().map(move |municipality| MunicipalityRow {
                municipality,
                region_code: &region.code,
                region_name: &region.name
            })
        })
        .collect())
}

/// Municipalities of the selected region.
pub fn detail(state: &AppState) -> DetailView<'_> {
    if let Some(err) = state.load_error() {
        return DetailView::Failed(err.to_string());
    }

    let Some(code) = state.selection() else {
        return DetailView::NoSelection;
    };

    match state.active_region() {
        Some(region) => DetailView::Region {
            code: &region.code,
            name: &region.name,
            municipalities: &region.municipalities
        },
        None => DetailView::NotFound { code }
    }
}

/// Options of the region dropdown used by the municipality form, placeholder excluded.
pub fn dropdown(state: &AppState) -> Vec<DropdownOption<'_>> {
    let Some(snapshot) = state.snapshot() else {
        return Vec::new();
    };
    let chosen = state.creation_region();

    snapshot.regions.iter()
        .map(|region| DropdownOption {
            value: &region.code,
            label: format!("{} - {}", region.code, region.name).trim().to_string(),
            selected: chosen == Some(region.code.as_str())
        })
        .collect()
}
