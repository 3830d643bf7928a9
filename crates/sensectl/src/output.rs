//! Output formatting - plain ASCII terminal output with colored labels

use owo_colors::OwoColorize;
use sense_shared::{Priority, Ticket};

const TEXT_WIDTH: usize = 48;

/// Priority label colored by urgency
pub fn priority_label(priority: Priority) -> String {
    let label = format!("{:<6}", priority.as_str());
    match priority {
        Priority::High => label.bright_red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.green().to_string(),
    }
}

/// Shorten text to `width` characters, marking the cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// One table row per ticket, in the order given
pub fn ticket_table(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets.".to_string();
    }

    let mut out = format!(
        "{:>4}  {:<6}  {:<15}  {:<12}  {:<10}  {}\n",
        "ID", "PRIO", "CATEGORY", "STATUS", "ASSIGNED", "TEXT"
    );
    for ticket in tickets {
        let assigned = if ticket.assigned_to.is_empty() {
            "-"
        } else {
            ticket.assigned_to.as_str()
        };
        out.push_str(&format!(
            "{:>4}  {}  {:<15}  {:<12}  {:<10}  {}\n",
            ticket.id,
            priority_label(ticket.priority),
            ticket.category.as_str(),
            ticket.status,
            assigned,
            truncate(&ticket.text, TEXT_WIDTH)
        ));
    }
    out
}

/// Single ticket, one field per line
pub fn ticket_detail(ticket: &Ticket) -> String {
    format!(
        "Ticket #{}\n  priority:  {}\n  category:  {}\n  status:    {}\n  assigned:  {}\n  rating:    {}\n  source:    {}\n  created:   {}\n  text:      {}",
        ticket.id,
        priority_label(ticket.priority),
        ticket.category.as_str(),
        ticket.status,
        ticket.assigned_to,
        ticket.customer_rating,
        ticket.source,
        ticket.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ticket.text
    )
}

/// Display an error
pub fn display_error(message: &str) {
    eprintln!("[ERROR] {}", message.red());
}

/// Display a success message
pub fn display_success(message: &str) {
    println!("[OK] {}", message.green());
}
