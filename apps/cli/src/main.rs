//! SalesDesk - sales encoder, reports and daily cash count.
//!
//! # Usage
//!
//! ```bash
//! # Price a sale without saving it
//! salesdesk price --package gold --quantity 2 --discount 10
//!
//! # Encode and save a sale
//! salesdesk encode --date 2026-02-08 --member-name "Ana Cruz" \
//!     --package gold --quantity 2 --mode cash --released-bottle 6
//! salesdesk entry --id <ID>
//!
//! # Reports (dates inclusive, search on member / PO / username)
//! salesdesk report sales --from 2026-02-01 --to 2026-02-08
//! salesdesk report inventory --date 2026-02-08
//! salesdesk report payments --search ana
//!
//! # Cash count for a day (denomination in pesos = pieces)
//! salesdesk cash save --date 2026-02-08 --line 1000=3 --line 0.25=4
//! salesdesk cash reconcile --date 2026-02-08
//!
//! # Printable forms
//! salesdesk forms save --type ER --payload '{"venue": "Hall A"}'
//! salesdesk forms print --id <ID>
//! ```
//!
//! Every command accepts `--json` to print the response as JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use salesdesk_cli::commands::{cash, encoder, forms, options, report};
use salesdesk_cli::error::ApiError;
use salesdesk_cli::state::{ConfigState, DbState, EncoderState};
use salesdesk_cli::{init_tracing, open_database, render};
use salesdesk_core::encoder::FormField;

#[derive(Parser)]
#[command(name = "salesdesk")]
#[command(author, version, about = "SalesDesk sales encoder and reports")]
struct Cli {
    /// Print responses as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the encoder form and save the sale
    Encode {
        #[command(flatten)]
        form: EncodeArgs,

        /// Show the filled form and prices without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Show a saved sale with its payments and inventory
    Entry {
        #[arg(long)]
        id: String,
    },
    /// Preview the price fields of a sale
    Price(PriceArgs),
    /// Sales, inventory and payment reports
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
    /// Daily cash count
    Cash {
        #[command(subcommand)]
        action: CashCommand,
    },
    /// Printable ER / SC / PI forms
    Forms {
        #[command(subcommand)]
        action: FormsCommand,
    },
    /// List the encoder's dropdown options
    Options,
    /// Show the active configuration
    Config,
}

#[derive(Args)]
struct PriceArgs {
    /// Package label or short name (silver, gold, platinum, retail, blister)
    #[arg(long)]
    package: String,

    #[arg(long, default_value = "1")]
    quantity: String,

    /// Blister packs are priced per blister count
    #[arg(long, default_value = "0")]
    blister_count: String,

    /// Discount percent, decimals allowed (7.5)
    #[arg(long, default_value = "0")]
    discount: String,

    /// One-time discount in pesos
    #[arg(long)]
    one_time_discount: Option<String>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Sale date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    po_number: Option<String>,
    #[arg(long)]
    member_name: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    new_member: bool,
    #[arg(long)]
    member_type: Option<String>,
    /// Package label or short name (silver, gold, platinum, retail, blister)
    #[arg(long)]
    package: Option<String>,
    /// "yes" or "no"
    #[arg(long)]
    to_blister: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    blister_count: Option<String>,
    /// Discount percent
    #[arg(long)]
    discount: Option<String>,
    /// One-time discount in pesos
    #[arg(long)]
    one_time_discount: Option<String>,
    /// Mode of payment 1 (cash, bank-transfer, e-wallet, cheque)
    #[arg(long)]
    mode: Option<String>,
    /// Provider of payment 1 (maya, gcash, bdo, bpi)
    #[arg(long)]
    mode_type: Option<String>,
    #[arg(long)]
    reference: Option<String>,
    #[arg(long)]
    mode2: Option<String>,
    #[arg(long)]
    mode_type2: Option<String>,
    #[arg(long)]
    reference2: Option<String>,
    /// Amount of payment 2 in pesos
    #[arg(long)]
    amount2: Option<String>,
    #[arg(long)]
    released_bottle: Option<String>,
    #[arg(long)]
    released_blister: Option<String>,
    #[arg(long)]
    to_follow_bottle: Option<String>,
    #[arg(long)]
    to_follow_blister: Option<String>,
    #[arg(long)]
    remarks: Option<String>,
    #[arg(long)]
    received_by: Option<String>,
    #[arg(long)]
    collected_by: Option<String>,
}

impl EncodeArgs {
    /// Fields given on the command line, in form order.
    fn fields(self) -> Vec<(FormField, String)> {
        [
            (FormField::Location, self.location),
            (FormField::Date, self.date),
            (FormField::PoNumber, self.po_number),
            (FormField::MemberName, self.member_name),
            (FormField::Username, self.username),
            (FormField::MemberType, self.member_type),
            (FormField::PackageType, self.package),
            (FormField::ToBlister, self.to_blister),
            (FormField::Quantity, self.quantity),
            (FormField::BlisterCount, self.blister_count),
            (FormField::Discount, self.discount),
            (FormField::OneTimeDiscount, self.one_time_discount),
            (FormField::ModeOfPayment, self.mode),
            (FormField::PaymentModeType, self.mode_type),
            (FormField::ReferenceNumber, self.reference),
            (FormField::ModeOfPayment2, self.mode2),
            (FormField::PaymentModeType2, self.mode_type2),
            (FormField::ReferenceNumber2, self.reference2),
            (FormField::Amount2, self.amount2),
            (FormField::ReleasedBottle, self.released_bottle),
            (FormField::ReleasedBlister, self.released_blister),
            (FormField::ToFollowBottle, self.to_follow_bottle),
            (FormField::ToFollowBlister, self.to_follow_blister),
            (FormField::Remarks, self.remarks),
            (FormField::ReceivedBy, self.received_by),
            (FormField::CollectedBy, self.collected_by),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Args)]
struct FilterArgs {
    /// First sale date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last sale date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Match member name, PO number or username
    #[arg(long)]
    search: Option<String>,
}

impl From<FilterArgs> for report::ReportQuery {
    fn from(args: FilterArgs) -> Self {
        report::ReportQuery {
            date_from: args.from,
            date_to: args.to,
            search: args.search,
        }
    }
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Sales rows with the per-package summary
    Sales(FilterArgs),
    /// Released / to-follow stock per entry
    Inventory {
        #[command(flatten)]
        filter: FilterArgs,
        /// Single sale date, listed in encoding order (ignores the filters)
        #[arg(long)]
        date: Option<String>,
    },
    /// Payment totals by mode and by category
    Payments(FilterArgs),
}

#[derive(Subcommand)]
enum CashCommand {
    /// Show the count sheet (default: today)
    Show {
        #[arg(long)]
        date: Option<String>,
    },
    /// Save the count sheet, replacing any earlier count for the date
    Save {
        #[arg(long)]
        date: Option<String>,
        /// DENOMINATION=PIECES, denomination in pesos; repeat per line
        #[arg(long = "line")]
        lines: Vec<String>,
    },
    /// Compare counted cash with the day's cash payments
    Reconcile {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum FormsCommand {
    /// Save a form; without --id a new reference number is allocated
    Save {
        /// ER, SC or PI
        #[arg(long = "type")]
        form_type: String,
        /// Existing submission to update
        #[arg(long)]
        id: Option<String>,
        /// JSON object
        #[arg(long, conflicts_with = "payload_file")]
        payload: Option<String>,
        /// File containing the JSON object
        #[arg(long)]
        payload_file: Option<PathBuf>,
    },
    /// Show a saved form
    Show {
        #[arg(long)]
        id: String,
    },
    /// Log a print of a saved form
    Print {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;
    let config = ConfigState::from_env();

    if let Err(e) = run(cli, &config).await {
        if json {
            if let Ok(body) = serde_json::to_string_pretty(&e) {
                println!("{}", body);
            }
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Prints `value` as JSON, or the rendered table.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), ApiError> {
    if json {
        let body = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Could not encode response: {}", e)))?;
        println!("{}", body);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

async fn run(cli: Cli, config: &ConfigState) -> Result<(), ApiError> {
    let json = cli.json;

    match cli.command {
        Commands::Encode {
            form,
            dry_run: true,
        } => {
            let state = fill_encoder(config, form);
            let filled = encoder::get_form(&state);
            emit(json, &filled, |r| render::encoder(config, r))
        }
        Commands::Price(args) => {
            let state = EncoderState::new(&config.location);
            encoder::apply_fields(
                &state,
                [
                    (FormField::PackageType, args.package),
                    (FormField::Quantity, args.quantity),
                    (FormField::BlisterCount, args.blister_count),
                    (FormField::Discount, args.discount),
                    (FormField::OneTimeDiscount, args.one_time_discount.unwrap_or_default()),
                ],
            );
            let pricing = encoder::preview_pricing(&state);
            emit(json, &pricing, |p| render::pricing(config, p))
        }
        Commands::Options => {
            let response = options::get_options(config);
            emit(json, &response, |o| render::options(config, o))
        }
        Commands::Config => {
            let response = options::get_config(config);
            emit(json, &response, render::config)
        }
        command => {
            let db = open_database(config).await?;
            let result = run_with_database(command, json, &db, config).await;
            // checkpoint the WAL even when the command failed
            db.inner().close().await;
            result
        }
    }
}

fn fill_encoder(config: &ConfigState, form: EncodeArgs) -> EncoderState {
    let new_member = form.new_member;
    let state = EncoderState::new(&config.location);
    encoder::apply_fields(&state, form.fields());
    encoder::set_new_member(&state, new_member);
    state
}

async fn run_with_database(
    command: Commands,
    json: bool,
    db: &DbState,
    config: &ConfigState,
) -> Result<(), ApiError> {
    match command {
        Commands::Encode { form, .. } => {
            let state = fill_encoder(config, form);
            let saved = encoder::save_entry(db, &state, config).await?;
            if let Some(warning) = &saved.warning {
                warn!(entry_id = %saved.entry_id, "{}", warning);
            }
            emit(json, &saved, |r| render::saved_entry(config, r))?;
        }
        Commands::Entry { id } => {
            let detail = encoder::get_entry(db, &id).await?;
            emit(json, &detail, |d| render::entry_detail(config, d))?;
        }
        Commands::Report { report: command } => match command {
            ReportCommand::Sales(filter) => {
                let response = report::sales_report(db, &filter.into()).await?;
                emit(json, &response, |r| render::sales_report(config, r))?;
            }
            ReportCommand::Inventory { filter, date } => {
                let response = match date {
                    Some(date) => report::inventory_report_for_date(db, &date).await?,
                    None => report::inventory_report(db, &filter.into()).await?,
                };
                emit(json, &response, |r| render::inventory_report(config, r))?;
            }
            ReportCommand::Payments(filter) => {
                let response = report::payment_report(db, &filter.into()).await?;
                emit(json, &response, |r| render::payment_report(config, r))?;
            }
        },
        Commands::Cash { action } => match action {
            CashCommand::Show { date } => {
                let date = date.unwrap_or_else(today);
                let sheet = cash::get_cash_count(db, config, &date).await?;
                emit(json, &sheet, |s| render::cash_count(config, s))?;
            }
            CashCommand::Save { date, lines } => {
                let date = date.unwrap_or_else(today);
                let inputs = lines
                    .iter()
                    .map(|line| cash::parse_cash_line(line))
                    .collect::<Result<Vec<_>, _>>()?;
                let sheet = cash::save_cash_count(db, config, &date, &inputs).await?;
                emit(json, &sheet, |s| render::cash_count(config, s))?;
            }
            CashCommand::Reconcile { date } => {
                let date = date.unwrap_or_else(today);
                let result = cash::reconcile_cash(db, config, &date).await?;
                emit(json, &result, |r| render::reconciliation(config, r))?;
            }
        },
        Commands::Forms { action } => match action {
            FormsCommand::Save {
                form_type,
                id,
                payload,
                payload_file,
            } => {
                let payload = match (payload, payload_file) {
                    (Some(text), _) => text,
                    (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
                        ApiError::validation(format!("Could not read {}: {}", path.display(), e))
                    })?,
                    (None, None) => "{}".to_string(),
                };
                let saved = forms::save_form(db, &form_type, id.as_deref(), &payload).await?;
                emit(json, &saved, render::form_submission)?;
            }
            FormsCommand::Show { id } => {
                let form = forms::get_form_submission(db, &id).await?;
                emit(json, &form, render::form_submission)?;
            }
            FormsCommand::Print { id } => {
                let printed = forms::print_form(db, &id).await?;
                emit(json, &printed, render::print)?;
            }
        },
        Commands::Price(_) | Commands::Options | Commands::Config => {
            return Err(ApiError::internal("command does not use the database"));
        }
    }

    Ok(())
}
