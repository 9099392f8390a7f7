use crate::engine::findings::{PriorTherapy, Qualifiers};
use crate::engine::label::{Category, Qualifier};
use crate::engine::taxonomy::TaxonomyProfile;

/// Qualifiers for a base category, in render order: therapy, germline, progression.
pub fn collect_qualifiers(
    category: &Category,
    qualifiers: &Qualifiers,
    profile: &TaxonomyProfile,
) -> (Vec<Qualifier>, Vec<String>) {
    let mut out = Vec::new();
    let mut notes = Vec::new();

    if category.is_redirect() {
        notes.push("Qualifiers: not appended to a redirect classification".to_string());
        return (out, notes);
    }

    let therapy = qualifiers.prior_therapy;
    if profile.accepts_therapy(therapy) {
        notes.push(format!(
            "Qualifiers: prior therapy '{}' is a qualifying exposure",
            therapy.label()
        ));
        out.push(Qualifier::PriorCytotoxicTherapy);
    } else if therapy != PriorTherapy::None {
        notes.push(format!(
            "Qualifiers: prior therapy '{}' is not a qualifying exposure under {}",
            therapy.label(),
            profile.taxonomy.name()
        ));
    }

    let (conditions, germline_notes) =
        germline_conditions(&qualifiers.germline_predisposition, profile);
    notes.extend(germline_notes);
    if conditions.is_empty() {
        notes.push("Qualifiers: no germline predisposition indicated".to_string());
    } else {
        notes.push(format!(
            "Qualifiers: germline predisposition {}",
            conditions.join(", ")
        ));
        out.push(Qualifier::GermlinePredisposition(conditions));
    }

    if qualifiers.prior_mds_over_3_months || qualifiers.prior_mds_or_mpn_over_3_months {
        notes.push("Qualifiers: prior MDS or MDS/MPN diagnosed over 3 months ago".to_string());
        out.push(Qualifier::ProgressedFromMds);
    }

    (out, notes)
}

/// Splits raw germline text into conditions and drops those the taxonomy does not
/// recognise. Entries keep their original wording; recognition ignores any
/// parenthetical suffix.
pub fn germline_conditions(
    raw: &[String],
    profile: &TaxonomyProfile,
) -> (Vec<String>, Vec<String>) {
    let mut kept = Vec::new();
    let mut notes = Vec::new();
    let entries = raw
        .iter()
        .flat_map(|r| r.split(','))
        .map(str::trim)
        .filter(|e| !e.is_empty() && !e.eq_ignore_ascii_case("none"));
    for entry in entries {
        let condition = strip_parenthetical(entry);
        if profile.recognises_germline(condition) {
            kept.push(entry.to_string());
        } else {
            notes.push(format!(
                "Qualifiers: germline predisposition '{}' is not recognised by {} and was excluded",
                entry,
                profile.taxonomy.name()
            ));
        }
    }
    (kept, notes)
}

fn strip_parenthetical(entry: &str) -> &str {
    match entry.find('(') {
        Some(idx) => entry[..idx].trim(),
        None => entry,
    }
}
