//! Tap Validation Demo
//!
//! Walks a login screen through the situations a tap can run into: a typo
//! in the target, an alert in the way, an element below the fold.
//!
//! # Running
//!
//! ```bash
//! cargo run --example tap_validation -p apuntar
//! ```

#![allow(clippy::unwrap_used)]

use apuntar::prelude::*;

fn login_screen(with_alert: bool) -> ElementNode {
    let mut root = ElementNode::new("window", Frame::new(0.0, 0.0, 430.0, 932.0)).with_children([
        ElementNode::new("textField", Frame::new(20.0, 200.0, 390.0, 44.0))
            .with_identifier("email")
            .with_label("Email"),
        ElementNode::new("secureTextField", Frame::new(20.0, 260.0, 390.0, 44.0))
            .with_identifier("password")
            .with_label("Password"),
        ElementNode::new("button", Frame::new(20.0, 330.0, 390.0, 44.0))
            .with_identifier("login-button")
            .with_label("Log In"),
        ElementNode::new("link", Frame::new(20.0, 1400.0, 390.0, 20.0))
            .with_identifier("terms")
            .with_label("Terms of Service"),
    ]);
    if with_alert {
        root = root.with_child(
            ElementNode::new("alert", Frame::new(40.0, 250.0, 350.0, 200.0)).with_label("Session expired"),
        );
    }
    root
}

fn show(title: &str, target: &Target, tree: &ElementNode) {
    println!("--- {title} ---");
    let result = validate_for_action(target, tree, &ActionType::Tap);
    if result.valid {
        println!("ok: {}\n", result.message.unwrap_or_default());
        return;
    }
    let error = create_error_from_validation_result(&result, target).unwrap();
    println!("{}", format_markdown(&error));
    println!("compact: {}\n", format_compact(&error));
}

fn main() {
    println!("=== Apuntar Tap Validation Demo ===\n");

    let clean = login_screen(false);
    show("Exact identifier", &Target::identifier("login-button"), &clean);
    show("Typo in identifier", &"#login".parse().unwrap(), &clean);
    show("Below the fold", &Target::label("Terms of Service"), &clean);
    show("Alert in the way", &Target::identifier("login-button"), &login_screen(true));

    println!("=== Demo Complete ===");
}
