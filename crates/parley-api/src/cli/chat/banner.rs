//! Welcome banner for the console chat.

use console::style;

use parley_types::chat::SystemRoleSupport;

/// Print the banner shown before the first prompt.
pub fn print_welcome_banner(model: &str, system_role: SystemRoleSupport) {
    let role_note = match system_role {
        SystemRoleSupport::Supported => "system prompt sent as system message",
        SystemRoleSupport::Unsupported => "system prompt sent as first user message",
    };

    println!();
    println!("  {}", style("parley").cyan().bold());
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!("  {}", style(role_note).dim());
    println!("  {}", style("---").dim());
    println!();
}
