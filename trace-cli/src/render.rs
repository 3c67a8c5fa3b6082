//! Plain-text rendering of backend documents

use std::fmt::Write;

use trace_client::{Product, ProductTrace};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Welcome line and owned-product count
pub fn dashboard(username: &str, product_count: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to your Dashboard, {username}!");
    let _ = writeln!(out, "  Products You Own: {product_count}");
    out
}

pub fn products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<20} {:<14} {:<14} {:<18} {:<20} {:>6}",
        "ID", "Name", "Origin", "Status", "Location", "Created", "Owner"
    );
    for p in products {
        let _ = writeln!(
            out,
            "{:<6} {:<20} {:<14} {:<14} {:<18} {:<20} {:>6}",
            p.id,
            p.name,
            p.origin,
            p.current_status,
            p.current_location,
            p.created_date.format(TIME_FORMAT),
            p.owner_user_id
        );
    }
    out
}

/// Product header followed by the history in backend order
pub fn trace(trace: &ProductTrace) -> String {
    let p = &trace.product;
    let mut out = String::new();
    let _ = writeln!(out, "Trace for Product: {} - {}", p.id, p.name);
    let _ = writeln!(out, "  Origin:           {}", p.origin);
    let _ = writeln!(out, "  Current Status:   {}", p.current_status);
    let _ = writeln!(out, "  Current Location: {}", p.current_location);
    let _ = writeln!(out, "  Current Owner ID: {}", p.owner_user_id);
    let _ = writeln!(out, "  Created Date:     {}", p.created_date.format(TIME_FORMAT));
    let _ = writeln!(out);

    if trace.event_history.is_empty() {
        let _ = writeln!(out, "No events recorded.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<6} {:<14} {:<28} {:<18} {:<20} {:>6}",
        "ID", "Type", "Description", "Location", "Timestamp", "Actor"
    );
    for e in &trace.event_history {
        let _ = writeln!(
            out,
            "{:<6} {:<14} {:<28} {:<18} {:<20} {:>6}",
            e.id,
            e.event_type.as_str(),
            e.event_description,
            e.location,
            e.timestamp.format(TIME_FORMAT),
            e.actor_user_id
        );
    }
    out
}
