use std::fmt::Write;

use client_common::form::{FeedbackKind, FieldId, FormState, Modal};

fn label(field: FieldId) -> &'static str {
    match field {
        FieldId::Current => "current",
        FieldId::New => "new",
        FieldId::Confirm => "confirm",
    }
}

fn check(met: bool) -> char {
    if met { 'x' } else { ' ' }
}

pub fn render(state: &FormState) -> String {
    let mut out = String::new();

    if let Some(flash) = state.flash() {
        let _ = writeln!(out, "** {} **", flash);
    }

    match state.modal() {
        Modal::Closed => {
            out.push_str("(modal closed)");
            return out;
        }
        Modal::Closing => out.push_str("(closing...)\n"),
        Modal::Open => {}
    }

    let visibility = state.visibility();
    for field in FieldId::ALL.iter().copied() {
        let value = state.value(field);
        let shown = if visibility.is_revealed(field) {
            format!("{:?}", value)
        } else {
            "*".repeat(value.chars().count())
        };
        let f = state.field(field);
        let marker = match f.kind() {
            FeedbackKind::Neutral => "",
            FeedbackKind::Error => "[error] ",
            FeedbackKind::Success => "[ok] ",
        };
        let _ = writeln!(out, "{:>8}: {:<24} {}{}", label(field), shown, marker, f.text());
    }

    let r = state.requirements();
    let _ = writeln!(out, "          [{}] 6+ characters  [{}] a letter  [{}] a number", check(r.length), check(r.letter), check(r.number));

    let submit = if state.submitting() {
        "submitting..."
    } else if state.submit_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    let _ = write!(out, "  submit: {}", submit);
    out
}
