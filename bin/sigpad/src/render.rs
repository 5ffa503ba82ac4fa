//! Plain-text rendering of the two panels.

use sigpad_flow::{FormView, SignerPanel, VerifierPanel, FILL_LABEL, VERIFY_LABEL};

const EMPTY: &str = "(empty)";

fn field(label: &str, value: &str) -> String {
    format!("  {label:<10} {}", if value.is_empty() { EMPTY } else { value })
}

fn block(label: &str, value: &str) -> Vec<String> {
    let mut lines = vec![format!("  {label}:")];
    if value.is_empty() {
        lines.push(format!("    {EMPTY}"));
    } else {
        lines.extend(value.lines().map(|l| format!("    | {l}")));
    }
    lines
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("  [ {label} ]")
    } else {
        format!("  [ {label} ] (disabled)")
    }
}

/// Show a key's prefix and length only.
pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return EMPTY.to_string();
    }
    let prefix: String = key.chars().take(6).collect();
    format!("{prefix}... ({} chars)", key.chars().count())
}

pub fn render_signer(panel: &SignerPanel) -> String {
    let mut lines = vec![format!("== Produce Signature [{}] ==", panel.method.label())];
    lines.extend(block("message", &panel.message));
    if let Some(key) = &panel.private_key {
        lines.push(field("key", &mask_key(key)));
    }
    lines.push(button(panel.action_label, panel.action_enabled));
    if let Some(error) = &panel.error {
        lines.push(format!("  ! {error}"));
    }
    lines.push(field("signature", panel.signature.as_deref().unwrap_or_default()));
    lines.push(field("address", panel.address.as_deref().unwrap_or_default()));
    if panel.can_fill_verifier {
        lines.push(format!("  [ {FILL_LABEL} -> ] (type `fill`)"));
    }
    lines.join("\n")
}

pub fn render_verifier(panel: &VerifierPanel) -> String {
    let mut lines = vec!["== Verify Signature ==".to_string()];
    lines.extend(block("message", &panel.message));
    lines.push(field("address", &panel.address));
    lines.push(field("signature", &panel.signature));
    match panel.result {
        None => lines.push(button(VERIFY_LABEL, panel.verify_enabled)),
        Some(badge) => {
            lines.push(format!("  << {} >> (type `reset` to clear)", badge.label()));
            if let Some((code, detail)) = &panel.error_detail {
                lines.push(format!("  ! 0x{code:02x}: {detail}"));
            }
        }
    }
    lines.join("\n")
}

pub fn render_form(view: &FormView) -> String {
    format!(
        "{}\n\n{}",
        render_signer(&view.signer),
        render_verifier(&view.verifier)
    )
}
