//! Assignment code descriptions and organization attribution.
//!
//! # Responsibility
//! - Own the curated code tables (`CodeCatalog`).
//! - Resolve a code through an ordered list of named rules.
//!
//! # Invariants
//! - Rules are evaluated in fixed priority; the first match wins.
//! - An unmatched code resolves to itself (passthrough), never to an error.
//! - Repair-line codes `L50` and `L51` match no pattern rule.

use crate::model::day::CodeDescriptor;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static REPAIR_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^L([0-9]+)").expect("valid repair line regex"));
static SHIFT_ROTA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[MTN]\d+$").expect("valid shift rota regex"));
static BUILTIN_RESOLVER: Lazy<CodeResolver> = Lazy::new(CodeResolver::builtin);

const SHIFT_ROTA_DESCRIPTION: &str = "persan turnos";
const SHIFT_ROTA_ORGANIZATION: &str = "Persan turnos";

const BUILTIN_DESCRIPTIONS: &[(&str, &str)] = &[
    ("L31", "cocacola reparacion"),
    ("MV", "movitech"),
    ("RY", "reyenvas"),
    ("/", ""),
    ("AC", "angel camacho"),
    ("VR", "vacaciones"),
    ("AR", "aranco"),
    ("BF", "bidafarma"),
    ("BFp", "bidafarma puerto real"),
    ("BFh", "bidafarma huelva"),
    ("BFm", "bidafarma malaga"),
    ("BFcm", "bidafarma camas"),
    ("BOR", "bordas"),
    ("HISP", "hispacold"),
    ("AF", "alfran"),
    ("AL", "alliance"),
    ("LAMt", "la muralla"),
    ("LAMm", "la muralla"),
    ("FOR", "formacion"),
    ("LYS", "lysur"),
    ("HA", "hariberica"),
    ("ST", "strugal"),
    ("CEU", "ceu"),
    ("MC", "mecalux"),
    ("SAI", "saica"),
    ("VEOt", "veolia"),
    ("BP", "baja paternidad"),
    ("PER", "persan fijos"),
    ("PERt", "persan turnos"),
    ("PERm", "persan turnos"),
    ("PERn", "persan turnos"),
    ("FORM", "formacion"),
    ("D", "libre"),
    ("CCs", "cocacola sevilla"),
    ("BE", "baja enfermedad"),
    ("BE ?", "baja enfermedad por confirmar"),
    ("CCsm", "cocacola sevilla"),
    ("P", "refresco iberia"),
    ("YB", "ybarra"),
    ("PRM", "primor"),
    ("LD", "lidl"),
    ("ONET", "onet"),
    ("VEI", "veimancha"),
    ("TH", "healthcare"),
    ("AP", "asuntos propios"),
    ("F5", "factor 5"),
    ("MED", "reconocimiento medico"),
    ("SMm", "sanmiguel"),
    ("NAVE", "nave"),
    ("L10Ele", "cocacola reparacion"),
    ("IN", "inalcoa"),
    ("ITP", "itp"),
    ("CP", "cementos portland"),
    ("M1", "persan turnos"),
    ("T1", "persan turnos"),
    ("N1", "persan turnos"),
    ("M2", "persan turnos"),
    ("T2", "persan turnos"),
    ("N2", "persan turnos"),
    ("M3", "persan turnos"),
    ("T3", "persan turnos"),
    ("N3", "persan turnos"),
    ("M4", "persan turnos"),
    ("T4", "persan turnos"),
    ("N4", "persan turnos"),
    ("ITV", "itv"),
];

const BUILTIN_ORGANIZATIONS: &[(&str, &str)] = &[
    ("PER", "Persan fijos"),
    ("PERt", "Persan turnos"),
    ("PERm", "Persan turnos"),
    ("PERn", "Persan turnos"),
];

/// Curated code tables.
///
/// `descriptions` maps a code to free-text vocabulary (empty values are
/// deliberate). `organizations` holds the codes whose organization is not
/// a capitalization of their description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCatalog {
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    #[serde(default)]
    pub organizations: BTreeMap<String, String>,
}

impl CodeCatalog {
    /// Tables shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            descriptions: owned_table(BUILTIN_DESCRIPTIONS),
            organizations: owned_table(BUILTIN_ORGANIZATIONS),
        }
    }

    /// Adds or replaces entries from `other`.
    pub fn extend(&mut self, other: CodeCatalog) {
        self.descriptions.extend(other.descriptions);
        self.organizations.extend(other.organizations);
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty() && self.organizations.is_empty()
    }
}

fn owned_table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(code, value)| ((*code).to_string(), (*value).to_string()))
        .collect()
}

/// One resolution step. Returns `None` when the rule does not apply.
#[derive(Clone, Copy)]
pub struct CodeRule {
    pub name: &'static str,
    pub apply: fn(&CodeCatalog, &str) -> Option<String>,
}

impl std::fmt::Debug for CodeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeRule").field("name", &self.name).finish()
    }
}

/// Description rules in priority order.
pub const DESCRIPTION_RULES: &[CodeRule] = &[
    CodeRule {
        name: "exact_description",
        apply: exact_description,
    },
    CodeRule {
        name: "repair_line_description",
        apply: repair_line_description,
    },
    CodeRule {
        name: "shift_rota_description",
        apply: shift_rota_description,
    },
];

/// Organization rules in priority order.
pub const ORGANIZATION_RULES: &[CodeRule] = &[
    CodeRule {
        name: "organization_override",
        apply: organization_override,
    },
    CodeRule {
        name: "shift_rota_organization",
        apply: shift_rota_organization,
    },
    CodeRule {
        name: "repair_line_organization",
        apply: repair_line_organization,
    },
    CodeRule {
        name: "description_organization",
        apply: description_organization,
    },
];

/// Bottling repair lines encoded as `L<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairLine {
    /// `n < 50`
    Cocacola,
    /// `n > 51`
    Refresco,
}

impl RepairLine {
    /// Classifies `L<digits>` codes; any suffix after the digits is ignored.
    ///
    /// Only ASCII digits form the line number. `L` followed by other
    /// decimal scripts is not a repair line and passes through.
    pub fn classify(code: &str) -> Option<Self> {
        let digits = REPAIR_LINE_RE.captures(code)?.get(1)?.as_str();
        // Overflow is the only parse failure left; such numbers are far above 51.
        let number = digits.parse::<u64>().unwrap_or(u64::MAX);
        match number {
            n if n < 50 => Some(Self::Cocacola),
            n if n > 51 => Some(Self::Refresco),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Cocacola => "cocacola reparacion",
            Self::Refresco => "refresco reparacion",
        }
    }

    pub fn organization(self) -> &'static str {
        match self {
            Self::Cocacola => "Cocacola reparacion",
            Self::Refresco => "Refresco reparacion",
        }
    }
}

fn exact_description(catalog: &CodeCatalog, code: &str) -> Option<String> {
    catalog.descriptions.get(code).cloned()
}

fn repair_line_description(_: &CodeCatalog, code: &str) -> Option<String> {
    RepairLine::classify(code).map(|line| line.description().to_string())
}

fn shift_rota_description(_: &CodeCatalog, code: &str) -> Option<String> {
    SHIFT_ROTA_RE
        .is_match(code)
        .then(|| SHIFT_ROTA_DESCRIPTION.to_string())
}

fn organization_override(catalog: &CodeCatalog, code: &str) -> Option<String> {
    catalog
        .organizations
        .get(code)
        .filter(|value| !value.is_empty())
        .cloned()
}

fn shift_rota_organization(_: &CodeCatalog, code: &str) -> Option<String> {
    SHIFT_ROTA_RE
        .is_match(code)
        .then(|| SHIFT_ROTA_ORGANIZATION.to_string())
}

fn repair_line_organization(_: &CodeCatalog, code: &str) -> Option<String> {
    RepairLine::classify(code).map(|line| line.organization().to_string())
}

fn description_organization(catalog: &CodeCatalog, code: &str) -> Option<String> {
    catalog
        .descriptions
        .get(code)
        .filter(|value| !value.is_empty())
        .map(|value| capitalize(value))
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Resolves codes against one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeResolver {
    catalog: CodeCatalog,
}

impl Default for CodeResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CodeResolver {
    pub fn new(catalog: CodeCatalog) -> Self {
        Self { catalog }
    }

    /// Resolver over the shipped tables.
    pub fn builtin() -> Self {
        Self::new(CodeCatalog::builtin())
    }

    /// Resolver over the shipped tables plus `extra` (extra entries win).
    pub fn with_extra(extra: CodeCatalog) -> Self {
        let mut catalog = CodeCatalog::builtin();
        catalog.extend(extra);
        Self::new(catalog)
    }

    pub fn catalog(&self) -> &CodeCatalog {
        &self.catalog
    }

    /// Human description of `code`; `""` for an empty code.
    pub fn describe(&self, code: &str) -> String {
        self.resolve(DESCRIPTION_RULES, code)
    }

    /// Organization `code` is attributed to; `""` for an empty code.
    pub fn organization_of(&self, code: &str) -> String {
        self.resolve(ORGANIZATION_RULES, code)
    }

    pub fn descriptor(&self, code: &str) -> CodeDescriptor {
        CodeDescriptor {
            description: self.describe(code),
            organization: self.organization_of(code),
        }
    }

    fn resolve(&self, rules: &[CodeRule], code: &str) -> String {
        let code = code.trim();
        if code.is_empty() {
            return String::new();
        }
        rules
            .iter()
            .find_map(|rule| (rule.apply)(&self.catalog, code))
            .unwrap_or_else(|| code.to_string())
    }
}

/// `CodeResolver::describe` over the shipped tables.
pub fn describe(code: &str) -> String {
    BUILTIN_RESOLVER.describe(code)
}

/// `CodeResolver::organization_of` over the shipped tables.
pub fn organization_of(code: &str) -> String {
    BUILTIN_RESOLVER.organization_of(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rules: &[CodeRule], name: &str) -> CodeRule {
        *rules
            .iter()
            .find(|rule| rule.name == name)
            .expect("rule should be registered")
    }

    #[test]
    fn repair_lines_split_around_fifty() {
        assert_eq!(describe("L40"), "cocacola reparacion");
        assert_eq!(describe("L60"), "refresco reparacion");
        assert_eq!(describe("L7x"), "cocacola reparacion");
        assert_eq!(describe("L50"), "L50");
        assert_eq!(describe("L51"), "L51");
        assert_eq!(organization_of("L50"), "L50");
        assert_eq!(organization_of("L99Ele"), "Refresco reparacion");
    }

    #[test]
    fn huge_repair_line_numbers_do_not_overflow() {
        assert_eq!(
            RepairLine::classify("L99999999999999999999999"),
            Some(RepairLine::Refresco)
        );
    }

    #[test]
    fn repair_line_number_must_be_ascii_digits() {
        assert_eq!(RepairLine::classify("L\u{0663}"), None);
        assert_eq!(describe("L\u{0663}"), "L\u{0663}");
        assert_eq!(organization_of("L\u{0663}"), "L\u{0663}");
        assert_eq!(describe("L3\u{0663}"), "cocacola reparacion");
    }

    #[test]
    fn shift_rota_requires_digits_to_the_end() {
        assert_eq!(describe("T7"), "persan turnos");
        assert_eq!(organization_of("N12"), "Persan turnos");
        assert_eq!(describe("M1x"), "M1x");
        assert_eq!(describe("MV"), "movitech");
    }

    #[test]
    fn exact_entries_are_returned_verbatim_even_when_empty() {
        assert_eq!(describe("/"), "");
        assert_eq!(describe(" BFp "), "bidafarma puerto real");
        assert_eq!(describe("BE ?"), "baja enfermedad por confirmar");
        assert_eq!(describe(""), "");
        assert_eq!(describe("   "), "");
    }

    #[test]
    fn organization_override_beats_description() {
        assert_eq!(organization_of("PER"), "Persan fijos");
        assert_eq!(organization_of("PERt"), "Persan turnos");
        assert_eq!(organization_of("M1"), "Persan turnos");
    }

    #[test]
    fn organization_falls_back_to_capitalized_description_then_code() {
        assert_eq!(organization_of("BFp"), "Bidafarma puerto real");
        assert_eq!(organization_of("AR"), "Aranco");
        assert_eq!(organization_of("/"), "/");
        assert_eq!(organization_of("ZZZ"), "ZZZ");
        assert_eq!(organization_of(""), "");
    }

    #[test]
    fn capitalize_lowers_the_remainder() {
        assert_eq!(capitalize("la MURALLA"), "La muralla");
        assert_eq!(capitalize("ñandú"), "Ñandú");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn rules_can_be_exercised_individually() {
        let catalog = CodeCatalog::builtin();
        let shift = rule(DESCRIPTION_RULES, "shift_rota_description");
        assert_eq!((shift.apply)(&catalog, "N3"), Some("persan turnos".to_string()));
        assert_eq!((shift.apply)(&catalog, "AR"), None);

        let fallback = rule(ORGANIZATION_RULES, "description_organization");
        assert_eq!((fallback.apply)(&catalog, "/"), None);
        assert_eq!((fallback.apply)(&catalog, "HISP"), Some("Hispacold".to_string()));
    }

    #[test]
    fn extra_catalog_entries_extend_the_builtin_tables() {
        let mut extra = CodeCatalog::default();
        extra.descriptions.insert("NEW".into(), "nueva EMPRESA".into());
        extra.organizations.insert("AR".into(), "Aranco Sur".into());
        let resolver = CodeResolver::with_extra(extra);

        assert_eq!(resolver.describe("NEW"), "nueva EMPRESA");
        assert_eq!(resolver.organization_of("NEW"), "Nueva empresa");
        assert_eq!(resolver.organization_of("AR"), "Aranco Sur");
        assert_eq!(resolver.describe("AR"), "aranco");
    }
}
