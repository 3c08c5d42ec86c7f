//! Query-string encoding of filter chips and view options.

use chrono::NaiveDate;

use super::filter::{ChipSet, FilterChip, FilterGroup, Ordering, ViewOptions, ViewType};
use super::timeline::{TimelineWindow, ViewMode};
use crate::error::{AppError, Result};

pub const ORDERING: &str = "ordering";
pub const SHOW_CLOSED: &str = "showClosedProjects";
pub const VIEW_TYPE: &str = "viewType";
pub const VIEW_MODE: &str = "viewMode";
pub const VIEW_START: &str = "viewStartDate";
pub const ZOOM: &str = "zoom";

/// Ordered `key=value` pairs. Keys this crate does not know are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=x,y`. A leading `?` is allowed; `+` decodes to a space.
    pub fn parse(query: &str) -> Result<Self> {
        let query = query.trim();
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for piece in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
            let key = decode(key)?;
            if key.is_empty() {
                continue;
            }
            params.set(key, decode(value)?);
        }
        Ok(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value for `key` in place, or append it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render without a leading `?`. Commas inside values stay literal.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn encode(s: &str) -> String {
    urlencoding::encode(s).replace("%2C", ",")
}

fn decode(s: &str) -> Result<String> {
    let spaced = s.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|cow| cow.into_owned())
        .map_err(|e| AppError::InvalidQuery(format!("{s:?}: {e}")))
}

/// One comma-joined parameter per filter group that has chips.
pub fn chips_to_params(chips: &ChipSet) -> QueryParams {
    let mut params = QueryParams::new();
    write_chips(chips, &mut params);
    params
}

fn write_chips(chips: &ChipSet, params: &mut QueryParams) {
    for group in FilterGroup::ALL {
        let values: Vec<&str> = chips
            .iter()
            .filter(|c| c.group() == Some(group))
            .map(|c| c.value.as_str())
            .collect();
        if values.is_empty() {
            params.remove(group.param());
        } else {
            params.set(group.param(), values.join(","));
        }
    }
}

/// One chip per comma-separated token of each filter parameter.
pub fn params_to_chips(params: &QueryParams) -> ChipSet {
    let mut chips = ChipSet::new();
    for group in FilterGroup::ALL {
        let Some(raw) = params.get(group.param()) else {
            continue;
        };
        for token in raw.split(',').map(|t| t.trim().to_lowercase()) {
            if !token.is_empty() {
                chips.add(FilterChip::new(group.param(), token));
            }
        }
    }
    chips
}

/// Timeline placement carried in the query. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowParams {
    pub mode: Option<ViewMode>,
    pub start: Option<NaiveDate>,
    pub zoom: Option<f32>,
}

impl WindowParams {
    pub fn from_window(window: &TimelineWindow) -> Self {
        Self {
            mode: Some(window.mode),
            start: Some(window.start),
            zoom: Some(window.zoom()),
        }
    }

    /// Build the window, falling back to the default anchor for `today`.
    pub fn to_window(&self, today: NaiveDate) -> TimelineWindow {
        let mut window = TimelineWindow::around(today);
        if let Some(mode) = self.mode {
            window.mode = mode;
        }
        if let Some(start) = self.start {
            window.start = start;
        }
        if let Some(zoom) = self.zoom {
            window.set_zoom(zoom);
        }
        window
    }
}

/// Everything the dashboard derives from the location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub chips: ChipSet,
    pub options: ViewOptions,
    pub window: WindowParams,
}

impl ViewState {
    /// Project `params` onto a state. Options not carried in the query
    /// (task display, grouping, columns) are taken from `local`.
    pub fn from_params(params: &QueryParams, local: &ViewOptions) -> Self {
        let defaults = ViewOptions::default();
        let options = ViewOptions {
            view_type: params
                .get(VIEW_TYPE)
                .and_then(ViewType::parse)
                .unwrap_or(defaults.view_type),
            ordering: params
                .get(ORDERING)
                .and_then(Ordering::parse)
                .unwrap_or(defaults.ordering),
            show_closed_projects: params
                .get(SHOW_CLOSED)
                .and_then(parse_bool)
                .unwrap_or(defaults.show_closed_projects),
            ..local.clone()
        };
        let window = WindowParams {
            mode: params.get(VIEW_MODE).and_then(ViewMode::parse),
            start: params
                .get(VIEW_START)
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()),
            zoom: params
                .get(ZOOM)
                .and_then(|s| s.trim().parse::<f32>().ok())
                .filter(|z| z.is_finite()),
        };
        Self {
            chips: params_to_chips(params),
            options,
            window,
        }
    }

    /// Merge this state over `params`. Keys owned by the state are replaced
    /// or removed; everything else is left alone.
    pub fn write_params(&self, params: &mut QueryParams) {
        write_chips(&self.chips, params);

        let defaults = ViewOptions::default();
        set_or_remove(
            params,
            VIEW_TYPE,
            (self.options.view_type != defaults.view_type).then(|| self.options.view_type.as_str().to_string()),
        );
        set_or_remove(
            params,
            ORDERING,
            (self.options.ordering != defaults.ordering).then(|| self.options.ordering.as_str().to_string()),
        );
        set_or_remove(
            params,
            SHOW_CLOSED,
            (self.options.show_closed_projects != defaults.show_closed_projects)
                .then(|| self.options.show_closed_projects.to_string()),
        );
        set_or_remove(params, VIEW_MODE, self.window.mode.map(|m| m.as_str().to_string()));
        set_or_remove(
            params,
            VIEW_START,
            self.window.start.map(|d| d.format("%Y-%m-%d").to_string()),
        );
        set_or_remove(params, ZOOM, self.window.zoom.map(|z| z.to_string()));
    }
}

fn set_or_remove(params: &mut QueryParams, key: &str, value: Option<String>) {
    match value {
        Some(value) => params.set(key, value),
        None => {
            params.remove(key);
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
