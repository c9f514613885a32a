// Command-line surface. One invocation performs exactly one operation:
// login, a single search, a bulk search, or printing the installation id.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "callerid",
    version,
    about = "Search caller name and related information for phone numbers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Search caller name and related information of a number
    #[arg(short = 's', long = "search", value_name = "NUMBER")]
    pub search: Option<String>,

    /// Make a bulk number search (comma-separated list, sent as-is)
    #[arg(long = "bs", alias = "bulk-search", value_name = "NUMBERS")]
    pub bulk_search: Option<String>,

    /// Show your installation id
    #[arg(short = 'i', long = "installation-id")]
    pub installation_id: bool,

    /// Print raw output
    #[arg(short = 'r', long)]
    pub raw: bool,

    /// Print only the caller name of the phone number
    #[arg(short = 'n', long)]
    pub name: bool,

    /// Print only the email assigned to the phone number
    #[arg(short = 'e', long)]
    pub email: bool,

    /// Print output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print output as XML
    #[arg(long)]
    pub xml: bool,

    /// Print output as YAML
    #[arg(long)]
    pub yaml: bool,

    /// Print output as an HTML table
    #[arg(long)]
    pub html: bool,

    /// Print output as plain text
    #[arg(long)]
    pub text: bool,

    /// Print without color
    #[arg(long = "nc", alias = "no-color")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and obtain an installation credential
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Xml,
    Yaml,
    Html,
    Text,
}

impl Cli {
    /// The requested output format, if any format flag was given. A format
    /// only wins when it is the sole format flag; conflicting flags fall
    /// back to plain text, and no flags at all yield `None` (the default
    /// name/email/text handling applies).
    pub fn output_format(&self) -> Option<OutputFormat> {
        match (self.json, self.xml, self.yaml, self.html, self.text) {
            (true, false, false, false, false) => Some(OutputFormat::Json),
            (false, true, false, false, false) => Some(OutputFormat::Xml),
            (false, false, true, false, false) => Some(OutputFormat::Yaml),
            (false, false, false, true, false) => Some(OutputFormat::Html),
            (false, false, false, false, false) => None,
            _ => Some(OutputFormat::Text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_the_login_subcommand() {
        let cli = Cli::try_parse_from(["callerid", "login"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Login)));
    }

    #[test]
    fn parses_a_search_with_format_flags() {
        let cli = Cli::try_parse_from(["callerid", "-s", "+919912345678", "--json", "--nc"])
            .unwrap();
        assert_eq!(cli.search.as_deref(), Some("+919912345678"));
        assert!(cli.no_color);
        assert_eq!(cli.output_format(), Some(OutputFormat::Json));
    }

    #[test]
    fn bulk_search_keeps_the_comma_joined_list() {
        let cli = Cli::try_parse_from(["callerid", "--bs", "+1111,+2222"]).unwrap();
        assert_eq!(cli.bulk_search.as_deref(), Some("+1111,+2222"));
    }

    #[test]
    fn conflicting_format_flags_fall_back_to_text() {
        let cli =
            Cli::try_parse_from(["callerid", "-s", "+1", "--json", "--xml"]).unwrap();
        assert_eq!(cli.output_format(), Some(OutputFormat::Text));
    }

    #[test]
    fn no_format_flags_yield_none() {
        let cli = Cli::try_parse_from(["callerid", "-s", "+1"]).unwrap();
        assert_eq!(cli.output_format(), None);
        assert_eq!(
            Cli::try_parse_from(["callerid", "--text"]).unwrap().output_format(),
            Some(OutputFormat::Text)
        );
    }
}
