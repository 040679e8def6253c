//! Mixing protocol builder
//!
//! Turns a computed dose list into an ordered mixing sequence honoring the
//! chemical constraints: silica first, then cal-mag, then base NPK in
//! micro -> grow -> bloom order, then the remaining supplements. The sort
//! is stable, so products with equal priority keep their catalog order.

use rust_decimal::Decimal;

use shared::{mixing_priority, mixing_warning, DoseResult, MixStep};

/// Build the full mixing protocol for a dose list
///
/// An empty dose list yields the preparation and verification steps only.
pub fn build_mixing_steps(doses: &[DoseResult], gallons: Option<Decimal>) -> Vec<MixStep> {
    let mut steps = Vec::with_capacity(doses.len() + 4);
    let mut order = 0u32;

    let mut push = |step: MixStepDraft| {
        order += 1;
        steps.push(MixStep {
            order,
            title: step.title.to_string(),
            action: step.action,
            detail: step.detail,
            tips: step.tips.iter().map(|t| t.to_string()).collect(),
            warning: step.warning.to_string(),
        });
    };

    push(MixStepDraft {
        title: "Preparation",
        action: "Prepare your mixing environment and equipment".to_string(),
        detail: "Use food-grade sanitizer, rinse equipment with RO water".to_string(),
        tips: &[
            "Clean all mixing equipment thoroughly",
            "Calibrate pH and EC/PPM meters",
            "Prepare measuring syringes and cups",
            "Wear protective gloves if needed",
        ],
        warning: "Contamination can lead to root problems",
    });

    let fill_action = match gallons {
        Some(g) => format!("Fill reservoir with {} gallons of water at room temperature", g),
        None => "Fill reservoir with water at room temperature".to_string(),
    };
    push(MixStepDraft {
        title: "Water Preparation",
        action: fill_action,
        detail: "Use RO or filtered water; record starting pH and EC".to_string(),
        tips: &[
            "Check water temperature (65-75\u{b0}F ideal)",
            "Measure initial EC/PPM of the water",
            "Let chlorinated water sit for 24h or use dechlorinator",
        ],
        warning: "Temperature affects nutrient availability",
    });

    let mut ordered: Vec<&DoseResult> = doses.iter().collect();
    ordered.sort_by_key(|d| mixing_priority(d.product_type));

    for dose in ordered {
        push(MixStepDraft {
            title: "Mixing Sequence",
            action: format!("Add {}", dose.product_name),
            detail: format!(
                "Amount: {} {} ({} {}/gal) - {}",
                dose.amount,
                dose.unit.code(),
                dose.per_unit_rate,
                dose.unit.code(),
                dose.notes
            ),
            tips: &["Mix thoroughly before the next addition"],
            warning: mixing_warning(dose.product_type),
        });
    }

    push(MixStepDraft {
        title: "Final Verification",
        action: "Top off to final volume and verify EC/PPM against target".to_string(),
        detail: "Compare readings to the target range for the growth stage".to_string(),
        tips: &[
            "Adjust pH to target range slowly",
            "Let the solution sit for 15 minutes",
            "Confirm all nutrients dissolved, no precipitation",
            "Record final measurements",
        ],
        warning: "Allow 15-30 minutes between pH adjustments",
    });

    steps
}

struct MixStepDraft {
    title: &'static str,
    action: String,
    detail: String,
    tips: &'static [&'static str],
    warning: &'static str,
}
