//! WASM bindings for genealogy record generalization and WikiTree citations.
//!
//! This crate provides WebAssembly bindings for use in browser extensions and Node.js.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use sourcer_core::normalize;
use sourcer_core::{
    CitationInput, CitationType, ExtractedData, GeneralizedData, Options, Site,
    build_household_table as core_household_table,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

fn parse_site(site: &str) -> Result<Site, JsValue> {
    site.parse().map_err(js_error)
}

fn extracted_data(ed: JsValue) -> Result<ExtractedData, JsValue> {
    match serde_wasm_bindgen::from_value::<serde_json::Value>(ed).map_err(js_error)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(JsValue::from_str("extracted data must be an object")),
    }
}

fn options_from_js(options: JsValue) -> Result<Options, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(Options::default());
    }
    let value: serde_json::Value = serde_wasm_bindgen::from_value(options).map_err(js_error)?;
    Ok(Options::from_value(value))
}

/// The accessed date: the given `YYYY-MM-DD` date, else today in the browser's time zone.
fn parse_run_date(run_date: Option<String>) -> Result<NaiveDate, JsValue> {
    match run_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => date
            .parse()
            .map_err(|e| JsValue::from_str(&format!("invalid run date {date}: {e}"))),
        None => {
            let now = js_sys::Date::new_0();
            NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
                .ok_or_else(|| JsValue::from_str("the current date is not valid"))
        }
    }
}

/// Generalize the extracted data of a page.
#[wasm_bindgen]
pub fn generalize(site: &str, ed: JsValue) -> Result<JsValue, JsValue> {
    let site = parse_site(site)?;
    let ed = extracted_data(ed)?;
    let gd = sourcer_core::generalize(site, &ed).map_err(js_error)?;
    to_js(&gd)
}

/// A page of a supported site, generalized once and cited on demand.
#[wasm_bindgen]
pub struct RecordPage {
    site: Site,
    ed: ExtractedData,
    gd: GeneralizedData,
}

#[wasm_bindgen]
impl RecordPage {
    /// Generalize a page; fails if its extracted data is not usable.
    #[wasm_bindgen(constructor)]
    pub fn new(site: &str, ed: JsValue) -> Result<RecordPage, JsValue> {
        let site = parse_site(site)?;
        let ed = extracted_data(ed)?;
        let gd = sourcer_core::generalize(site, &ed).map_err(js_error)?;
        Ok(Self { site, ed, gd })
    }

    /// The generalized data of the page.
    #[wasm_bindgen(js_name = generalizedData)]
    pub fn generalized_data(&self) -> Result<JsValue, JsValue> {
        to_js(&self.gd)
    }

    /// Build a citation in the given style (`inline`, `source` or `narrative`).
    #[wasm_bindgen(js_name = buildCitation)]
    pub fn build_citation(
        &self,
        citation_type: &str,
        options: JsValue,
        run_date: Option<String>,
        sharing_link: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let citation_type: CitationType = citation_type.parse().map_err(js_error)?;
        let options = options_from_js(options)?;
        let household_table_string = self
            .gd
            .household
            .as_ref()
            .map(|_| core_household_table(&self.gd, &options, None).table_string);

        let input = CitationInput {
            site: self.site,
            ed: &self.ed,
            gd: &self.gd,
            citation_type,
            run_date: parse_run_date(run_date)?,
            options: &options,
            household_table_string,
            sharing_link,
        };
        let citation = sourcer_core::build_citation(&input).map_err(js_error)?;
        to_js(&citation)
    }

    /// Build the household table, captioned with a citation when one is given.
    #[wasm_bindgen(js_name = buildHouseholdTable)]
    pub fn build_household_table(&self, options: JsValue, citation: Option<String>) -> Result<JsValue, JsValue> {
        let options = options_from_js(options)?;
        to_js(&core_household_table(&self.gd, &options, citation.as_deref()))
    }
}

/// Utilities for working with names found in records.
#[wasm_bindgen]
pub struct NameUtils;

#[wasm_bindgen]
impl NameUtils {
    /// Convert an all-caps name such as `MACGREGOR` to mixed case.
    #[wasm_bindgen(js_name = toMixedCase)]
    pub fn to_mixed_case(name: &str) -> String {
        normalize::convert_name_from_all_caps_to_mixed_case(name)
    }

    /// Expand an abbreviated given name, e.g. `Wm` to `William`.
    #[wasm_bindgen(js_name = abbreviationToFull)]
    pub fn abbreviation_to_full(abbreviation: &str) -> Option<String> {
        normalize::abbreviation_to_full(abbreviation).map(str::to_string)
    }

    /// The first abbreviation of a full given name.
    #[wasm_bindgen(js_name = fullToAbbreviation)]
    pub fn full_to_abbreviation(full_name: &str) -> Option<String> {
        normalize::full_to_abbreviation(full_name).map(str::to_string)
    }

    /// Expand every abbreviated word of a forenames string.
    #[wasm_bindgen(js_name = expandForenames)]
    pub fn expand_forenames(forenames: &str) -> String {
        normalize::expand_abbreviated_forenames(forenames)
    }
}
