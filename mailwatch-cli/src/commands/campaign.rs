//! Campaign command handlers
//!
//! Lists campaigns with the remembered sort, activates sort controls and
//! creates new campaign jobs.

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use colored::*;
use mailwatch_client::CampaignClient;
use mailwatch_core::domain::sort::{SortField, SortState};

use crate::config::Config;
use crate::service::{FileStateStore, StateStore};
use crate::view::campaigns::{activate_control, apply_user_sort, restore_sort};
use crate::view::terminal::print_campaign_list;
use crate::view::{CampaignList, SortControls};

/// Sortable column, as typed on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortFieldArg {
    Date,
    Name,
    Status,
}

impl From<SortFieldArg> for SortField {
    fn from(arg: SortFieldArg) -> Self {
        match arg {
            SortFieldArg::Date => SortField::Date,
            SortFieldArg::Name => SortField::Name,
            SortFieldArg::Status => SortField::Status,
        }
    }
}

/// Campaign subcommands
#[derive(Subcommand)]
pub enum CampaignCommands {
    /// List campaigns, sorted as last chosen
    List {
        /// Sort by this column (remembered for next time)
        #[arg(long, value_enum)]
        sort: Option<SortFieldArg>,

        /// Sort descending; only used with --sort
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Leave these campaigns out of the listing
        #[arg(long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,
    },
    /// Activate the sort control of a column, toggling its direction
    Sort {
        #[arg(value_enum)]
        field: SortFieldArg,
    },
    /// Create a new campaign job
    Create {
        /// Form action; relative to the campaign page. Defaults to the list URL
        #[arg(long)]
        action: Option<String>,

        /// Form field as key=value (repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

/// Handle campaign commands
pub async fn handle_campaign_command(
    command: CampaignCommands,
    client: &CampaignClient,
    config: &Config,
) -> Result<()> {
    let mut store = FileStateStore::open(&config.state_path)?;

    match command {
        CampaignCommands::List {
            sort,
            desc,
            exclude,
        } => {
            let explicit = sort.map(|field| SortState::new(field.into(), !desc));
            list_campaigns(client, config, &mut store, explicit, &exclude).await
        }
        CampaignCommands::Sort { field } => {
            sort_campaigns(client, config, &mut store, field.into()).await
        }
        CampaignCommands::Create { action, fields } => {
            create_campaign(client, config, &mut store, action, fields).await
        }
    }
}

/// Fetch the campaign list and restore the persisted sort
async fn load_list(
    client: &CampaignClient,
    config: &Config,
    store: &dyn StateStore,
) -> Result<(CampaignList, SortControls)> {
    let list_url = config.list_url();
    let campaigns = match client.list_campaigns(&list_url).await {
        Ok(campaigns) => campaigns,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("No campaign list at {} (set --list-url)", list_url)
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load campaigns from {}", list_url));
        }
    };

    let mut list = CampaignList::new(campaigns);
    let mut controls = SortControls::default();
    restore_sort(&mut list, &mut controls, store)?;

    Ok((list, controls))
}

async fn list_campaigns(
    client: &CampaignClient,
    config: &Config,
    store: &mut dyn StateStore,
    explicit: Option<SortState>,
    exclude: &[String],
) -> Result<()> {
    let (mut list, mut controls) = load_list(client, config, store).await?;

    if let Some(state) = explicit {
        apply_user_sort(&mut list, &mut controls, state, store)?;
    }

    for name in exclude {
        if list.remove(name).is_none() {
            println!("{}", format!("⚠ No campaign named {}", name).yellow());
        }
    }

    print_campaign_list(&list, &controls);
    Ok(())
}

async fn sort_campaigns(
    client: &CampaignClient,
    config: &Config,
    store: &mut dyn StateStore,
    field: SortField,
) -> Result<()> {
    let (mut list, mut controls) = load_list(client, config, store).await?;

    let state = activate_control(&mut list, &mut controls, field, store)?;
    println!(
        "{}",
        format!("Sorted by {} ({})", state.field, state.direction().as_str()).bold()
    );
    println!();

    print_campaign_list(&list, &controls);
    Ok(())
}

async fn create_campaign(
    client: &CampaignClient,
    config: &Config,
    store: &mut dyn StateStore,
    action: Option<String>,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let action = action.unwrap_or_else(|| config.list_url());

    client
        .create_job(&action, &fields)
        .await
        .context("Failed to create the campaign job")?;

    println!("{}", "✓ Campaign job created".green());
    println!();

    let (list, controls) = load_list(client, config, store).await?;
    print_campaign_list(&list, &controls);
    Ok(())
}

/// Parse a `key=value` form field
fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in {:?}", raw));
    }

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("title=Spring news").unwrap(),
            ("title".to_string(), "Spring news".to_string())
        );
        assert_eq!(
            parse_field("notes=a=b").unwrap(),
            ("notes".to_string(), "a=b".to_string())
        );
        assert!(parse_field("title").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_sort_field_arg_conversion() {
        assert_eq!(SortField::from(SortFieldArg::Status), SortField::Status);
        assert_eq!(SortField::from(SortFieldArg::Date), SortField::Date);
    }
}
