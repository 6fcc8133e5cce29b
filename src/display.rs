//! 端末表示用の整形

use mediscan_common::DrugRecord;
use std::fmt::Write;

/// 1行要約
pub fn format_summary(drug: &DrugRecord) -> String {
    format!("{} ({}) - {} [{}]", drug.name, drug.generic_name, drug.category, drug.id)
}

/// 詳細表示
///
/// `authenticated` は今回のワークフローで真正性を確認したかどうか。
pub fn format_details(drug: &DrugRecord, authenticated: bool) -> String {
    let mut out = String::new();

    // String への書き込みは失敗しない
    let _ = writeln!(out, "{}", drug.name);
    let _ = writeln!(out, "  Generic name : {}", drug.generic_name);
    let _ = writeln!(out, "  Category     : {}", drug.category);
    let _ = writeln!(out, "  Manufacturer : {}", drug.manufacturer);
    let _ = writeln!(out, "  Batch No.    : {}", drug.batch_no);
    let _ = writeln!(out, "  Mfg. date    : {}", drug.mfg_date);
    let _ = writeln!(out, "  Exp. date    : {}", drug.exp_date);

    let _ = writeln!(out, "\nAuthenticity");
    if authenticated {
        let _ = writeln!(out, "  ✔ Serial number verified for this package");
    }
    let _ = writeln!(
        out,
        "  Listed as authentic: {}",
        if drug.authenticity_verified { "yes" } else { "no" }
    );
    if !drug.authenticity_note.is_empty() {
        let _ = writeln!(out, "  {}", drug.authenticity_note);
    }

    if !drug.doses.is_empty() {
        let _ = writeln!(out, "\nDoses");
        for dose in &drug.doses {
            let _ = writeln!(out, "  - {} {}", dose.strength, dose.form);
        }
    }

    if !drug.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings");
        for (category, text) in &drug.warnings {
            let _ = writeln!(out, "  [{}] {}", category, text);
        }
    }

    if !drug.indications.is_empty() {
        let _ = writeln!(out, "\nIndications");
        for indication in &drug.indications {
            let _ = writeln!(out, "  - {}", indication);
        }
    }

    if !drug.regimen.general.is_empty() || !drug.regimen.specific.is_empty() {
        let _ = writeln!(out, "\nRegimen");
        if !drug.regimen.general.is_empty() {
            let _ = writeln!(out, "  {}", drug.regimen.general);
        }
        for entry in &drug.regimen.specific {
            let _ = writeln!(out, "  - {}: {}", entry.condition, entry.duration);
        }
    }

    if !drug.food_interactions.is_empty() {
        let _ = writeln!(out, "\nFood interactions");
        for fi in &drug.food_interactions {
            let _ = writeln!(out, "  - {}: {}", fi.item, fi.effect);
        }
    }

    if !drug.drug_interactions.is_empty() {
        let _ = writeln!(out, "\nDrug interactions");
        for di in &drug.drug_interactions {
            let _ = writeln!(out, "  - {} ({}): {}", di.drug, di.useful.label(), di.description);
        }
    }

    out
}
