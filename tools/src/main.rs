//! ledger-cli: front-end for the lending ledger.
//!
//! Usage:
//!   ledger-cli --db ledger.db          interactive menu
//!   ledger-cli --db ledger.db --ipc    one JSON command per stdin line
//!
//! Every operation goes through `Ledger::execute`; this binary only
//! prompts, parses, and prints.

use std::env;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use ledger_core::{
    account::{AccountDraft, AccountRecord, AccountType, AccountUpdate},
    asset::{AssetDraft, AssetMode, AssetRecord, AssetType, AssetUpdate, SizeUnit},
    command::{CommandOutcome, LedgerCommand},
    ledger::Ledger,
    link_registry::LinkReport,
    loan::{InterestFrequency, LoanDraft, LoanRecord, LoanUpdate},
    party::{FirmDetails, LinkUpdate, PartyDraft, PartyKind, PartyRecord, PartyUpdate},
    transaction::{
        ExpenseSubtype, TransactionDraft, TransactionRecord, TransactionUpdate, TxnMode, TxnType,
    },
    types::RecordId,
    validate,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("ledger.db");
    let ipc_mode = args.iter().any(|a| a == "--ipc");

    let mut ledger = Ledger::open(db)?;
    log::info!("ledger opened at {db}");

    if ipc_mode {
        run_ipc_loop(&mut ledger)
    } else {
        run_menu(&mut ledger)
    }
}

// ── IPC mode ──────────────────────────────────────────────────────

/// One JSON-encoded `LedgerCommand` per input line, one JSON outcome
/// (or `{"error": ...}`) per output line. Parse errors never stop the
/// loop.
fn run_ipc_loop(ledger: &mut Ledger) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        if handle.read_line(&mut buffer)? == 0 {
            break; // EOF
        }
        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<LedgerCommand>(line) {
            Ok(cmd) => match ledger.execute(cmd) {
                Ok(outcome) => serde_json::to_string(&outcome)?,
                Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
            },
            Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

// ── Prompting ─────────────────────────────────────────────────────

struct Prompt {
    stdin: io::StdinLock<'static>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
        }
    }

    /// Read one trimmed line; `None` on end of input.
    fn line(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        let mut buf = String::new();
        if self.stdin.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Re-prompt until the input is non-empty.
    fn required(&mut self, label: &str) -> Result<Option<String>> {
        loop {
            match self.line(label)? {
                None => return Ok(None),
                Some(s) if s.is_empty() => println!("A value is required."),
                Some(s) => return Ok(Some(s)),
            }
        }
    }

    /// Empty input means "no value".
    fn optional(&mut self, label: &str) -> Result<Option<Option<String>>> {
        Ok(self.line(label)?.map(|s| (!s.is_empty()).then_some(s)))
    }

    /// Re-prompt until `check` passes.
    fn checked(
        &mut self,
        label: &str,
        complaint: &str,
        check: impl Fn(&str) -> bool,
    ) -> Result<Option<String>> {
        loop {
            match self.line(label)? {
                None => return Ok(None),
                Some(s) if check(&s) => return Ok(Some(s)),
                Some(_) => println!("{complaint}"),
            }
        }
    }

    fn number<T: std::str::FromStr>(&mut self, label: &str) -> Result<Option<T>> {
        loop {
            match self.line(label)? {
                None => return Ok(None),
                Some(s) => match s.parse() {
                    Ok(n) => return Ok(Some(n)),
                    Err(_) => println!("Invalid number, try again."),
                },
            }
        }
    }

    fn optional_number<T: std::str::FromStr>(&mut self, label: &str) -> Result<Option<Option<T>>> {
        loop {
            match self.line(label)? {
                None => return Ok(None),
                Some(s) if s.is_empty() => return Ok(Some(None)),
                Some(s) => match s.parse() {
                    Ok(n) => return Ok(Some(Some(n))),
                    Err(_) => println!("Invalid number, try again (or leave blank)."),
                },
            }
        }
    }

    fn date(&mut self, label: &str) -> Result<Option<NaiveDate>> {
        loop {
            match self.line(label)? {
                None => return Ok(None),
                Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                    Ok(d) => return Ok(Some(d)),
                    Err(_) => println!("Invalid date, expected YYYY-MM-DD."),
                },
            }
        }
    }

    /// Numbered pick from a closed value set.
    fn choice<T: Copy + std::fmt::Display>(
        &mut self,
        label: &str,
        options: &[T],
    ) -> Result<Option<T>> {
        println!("{label}");
        for (i, option) in options.iter().enumerate() {
            println!("{}. {option}", i + 1);
        }
        loop {
            match self.number::<usize>("Enter the number of your choice: ")? {
                None => return Ok(None),
                Some(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1])),
                Some(_) => println!("Pick a number between 1 and {}.", options.len()),
            }
        }
    }

    /// Comma-separated record ids; anything unparsable is reported and
    /// dropped here, link eligibility is the registry's call.
    fn id_list(&mut self, label: &str) -> Result<Option<Vec<RecordId>>> {
        let Some(raw) = self.line(label)? else {
            return Ok(None);
        };
        let mut ids = Vec::new();
        for piece in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match piece.parse() {
                Ok(id) => ids.push(id),
                Err(_) => println!("'{piece}' is not an account id, skipping."),
            }
        }
        Ok(Some(ids))
    }
}

/// Run one command and print what came back. Recoverable rejections
/// (bad input, unknown ids) return to the menu; so do storage errors,
/// after being logged.
fn run(ledger: &mut Ledger, cmd: LedgerCommand) {
    match ledger.execute(cmd) {
        Ok(outcome) => render(&outcome),
        Err(e) if e.is_recoverable() => println!("{e}"),
        Err(e) => {
            log::error!("operation failed: {e}");
            println!("Operation failed: {e}");
        }
    }
}

// ── Menus ─────────────────────────────────────────────────────────

/// `Ok(None)` everywhere below means the input stream ended; menus
/// unwind quietly.
fn run_menu(ledger: &mut Ledger) -> Result<()> {
    let mut prompt = Prompt::new();
    loop {
        println!();
        println!("Main Menu");
        println!("1. Borrower");
        println!("2. Facilitator");
        println!("3. Investor");
        println!("4. Partner");
        println!("5. Firm");
        println!("6. Asset");
        println!("7. Loan");
        println!("8. Transaction");
        println!("9. Account");
        println!("0. Exit");
        let Some(choice) = prompt.line("Enter your choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => party_submenu(ledger, &mut prompt, PartyKind::Borrower)?,
            "2" => party_submenu(ledger, &mut prompt, PartyKind::Facilitator)?,
            "3" => party_submenu(ledger, &mut prompt, PartyKind::Investor)?,
            "4" => party_submenu(ledger, &mut prompt, PartyKind::Partner)?,
            "5" => party_submenu(ledger, &mut prompt, PartyKind::Firm)?,
            "6" => asset_submenu(ledger, &mut prompt)?,
            "7" => loan_submenu(ledger, &mut prompt)?,
            "8" => transaction_submenu(ledger, &mut prompt)?,
            "9" => account_submenu(ledger, &mut prompt)?,
            "0" => break,
            _ => println!("Invalid choice, try again."),
        }
    }
    Ok(())
}

macro_rules! submenu {
    ($name:ident, $title:literal, $add:ident, $view:ident, $update:ident) => {
        fn $name(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
            loop {
                println!();
                println!(concat!($title, " Submenu"));
                println!(concat!("1. Add New ", $title));
                println!(concat!("2. View ", $title));
                println!(concat!("3. Update ", $title));
                println!("0. Back to Main Menu");
                let Some(choice) = prompt.line("Enter your choice: ")? else {
                    return Ok(());
                };
                match choice.as_str() {
                    "1" => $add(ledger, prompt)?,
                    "2" => $view(ledger, prompt)?,
                    "3" => $update(ledger, prompt)?,
                    "0" => return Ok(()),
                    _ => println!("Invalid choice, try again."),
                }
            }
        }
    };
}

submenu!(account_submenu, "Account", add_account, view_account, update_account);
submenu!(asset_submenu, "Asset", add_asset, view_asset, update_asset);
submenu!(loan_submenu, "Loan", add_loan, view_loan, update_loan);
submenu!(
    transaction_submenu,
    "Transaction",
    add_transaction,
    view_transaction,
    update_transaction
);

fn party_submenu(ledger: &mut Ledger, prompt: &mut Prompt, kind: PartyKind) -> Result<()> {
    loop {
        println!();
        println!("{kind} Submenu");
        println!("1. Add New {kind}");
        println!("2. View {kind}");
        println!("3. Update {kind}");
        println!("0. Back to Main Menu");
        let Some(choice) = prompt.line("Enter your choice: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => add_party(ledger, prompt, kind)?,
            "2" => view_party(ledger, prompt, kind)?,
            "3" => update_party(ledger, prompt, kind)?,
            "0" => return Ok(()),
            _ => println!("Invalid choice, try again."),
        }
    }
}

// ── Account operations ────────────────────────────────────────────

fn add_account(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(holder_name) = prompt.required("Enter Account Holder Name: ")? else {
        return Ok(());
    };
    let Some(bank_name) = prompt.required("Enter Bank Name: ")? else {
        return Ok(());
    };
    let Some(routing_code) = prompt.checked(
        "Enter Routing Code: ",
        "Invalid routing code: 4 uppercase letters, a zero, then 6 uppercase alphanumerics.",
        validate::routing_code_is_valid,
    )?
    else {
        return Ok(());
    };
    let Some(number) = prompt.required("Enter Account Number: ")? else {
        return Ok(());
    };
    let Some(branch) = prompt.required("Enter Branch: ")? else {
        return Ok(());
    };
    let Some(account_type) = prompt.choice("Select Account Type:", AccountType::ALL)? else {
        return Ok(());
    };

    run(
        ledger,
        LedgerCommand::CreateAccount {
            draft: AccountDraft {
                holder_name,
                bank_name,
                routing_code,
                number,
                branch,
                account_type,
            },
        },
    );
    Ok(())
}

fn view_account(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    println!("1. View a specific account by id");
    println!("2. View all accounts");
    println!("3. Search accounts by holder name");
    let Some(choice) = prompt.line("Enter your choice: ")? else {
        return Ok(());
    };
    match choice.as_str() {
        "1" => {
            let Some(account_id) = prompt.number("Enter Account ID: ")? else {
                return Ok(());
            };
            run(ledger, LedgerCommand::GetAccount { account_id });
        }
        "2" => run(ledger, LedgerCommand::ListAccounts),
        "3" => {
            let Some(holder_name) = prompt.required("Enter holder name to search: ")? else {
                return Ok(());
            };
            run(ledger, LedgerCommand::SearchAccounts { holder_name });
        }
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn update_account(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(account_id) = prompt.number("Enter Account ID to update: ")? else {
        return Ok(());
    };
    let Some(update) = (|| -> Result<Option<AccountUpdate>> {
        let Some(holder_name) = prompt.optional("New Holder Name (blank to keep): ")? else {
            return Ok(None);
        };
        let Some(bank_name) = prompt.optional("New Bank Name (blank to keep): ")? else {
            return Ok(None);
        };
        let Some(routing_code) = prompt.optional("New Routing Code (blank to keep): ")? else {
            return Ok(None);
        };
        let Some(number) = prompt.optional("New Account Number (blank to keep): ")? else {
            return Ok(None);
        };
        let Some(branch) = prompt.optional("New Branch (blank to keep): ")? else {
            return Ok(None);
        };
        let account_type = match prompt.optional("Change account type? (y to choose): ")? {
            None => return Ok(None),
            Some(Some(answer)) if answer.eq_ignore_ascii_case("y") => {
                match prompt.choice("Select Account Type:", AccountType::ALL)? {
                    None => return Ok(None),
                    choice => choice,
                }
            }
            Some(_) => None,
        };
        Ok(Some(AccountUpdate {
            holder_name,
            bank_name,
            routing_code,
            number,
            branch,
            account_type,
        }))
    })()?
    else {
        return Ok(());
    };
    run(ledger, LedgerCommand::UpdateAccount { account_id, update });
    Ok(())
}

// ── Party operations ──────────────────────────────────────────────

fn add_party(ledger: &mut Ledger, prompt: &mut Prompt, kind: PartyKind) -> Result<()> {
    println!("Enter {kind} details:");
    let Some(name) = prompt.required("Name: ")? else {
        return Ok(());
    };
    let Some(phone) = prompt.checked(
        "Phone: ",
        "Invalid phone number: must be exactly 10 digits.",
        validate::phone_is_valid,
    )?
    else {
        return Ok(());
    };
    let Some(email) = prompt.checked(
        "Email: ",
        "Invalid email address.",
        validate::email_is_valid,
    )?
    else {
        return Ok(());
    };
    let Some(address) = prompt.required("Address: ")? else {
        return Ok(());
    };
    let Some(tax_id) = prompt.checked(
        "Tax ID: ",
        "Invalid tax id: must match the shape ABCDE1234F.",
        validate::tax_id_is_valid,
    )?
    else {
        return Ok(());
    };
    let Some(national_id) = prompt.checked(
        "National ID: ",
        "Invalid national id: must be exactly 12 digits.",
        validate::national_id_is_valid,
    )?
    else {
        return Ok(());
    };

    let (mut heir_name, mut heir_tax_id) = (None, None);
    if kind == PartyKind::Investor {
        let Some(heir) = prompt.optional("Legal Heir Name (blank for none): ")? else {
            return Ok(());
        };
        heir_name = heir;
        heir_tax_id = loop {
            match prompt.optional("Legal Heir Tax ID (blank for none): ")? {
                None => return Ok(()),
                Some(None) => break None,
                Some(Some(tax)) if validate::tax_id_is_valid(&tax) => break Some(tax),
                Some(Some(_)) => println!("Invalid tax id: must match the shape ABCDE1234F."),
            }
        };
    }

    let mut firm = None;
    if kind == PartyKind::Firm {
        let Some(registered_date) = prompt.date("Registered Date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(members) = prompt.number("Number of Members: ")? else {
            return Ok(());
        };
        let Some(percent_owned) = prompt.number("Percent Owned: ")? else {
            return Ok(());
        };
        let Some(state) = prompt.required("Firm State (Active, Inactive, Closed): ")? else {
            return Ok(());
        };
        firm = Some(FirmDetails {
            registered_date,
            members,
            percent_owned,
            state,
        });
    }

    let Some(link_accounts) =
        prompt.id_list("Account IDs to link (comma-separated, blank for none): ")?
    else {
        return Ok(());
    };

    run(
        ledger,
        LedgerCommand::CreateParty {
            draft: PartyDraft {
                kind,
                name,
                phone,
                email,
                address,
                tax_id,
                national_id,
                heir_name,
                heir_tax_id,
                firm,
                link_accounts,
            },
        },
    );
    Ok(())
}

fn view_party(ledger: &mut Ledger, prompt: &mut Prompt, kind: PartyKind) -> Result<()> {
    println!("1. View a single {kind} by id");
    println!("2. View all");
    let Some(choice) = prompt.line("Enter your choice: ")? else {
        return Ok(());
    };
    match choice.as_str() {
        "1" => {
            let Some(party_id) = prompt.number("Enter ID: ")? else {
                return Ok(());
            };
            run(ledger, LedgerCommand::GetParty { kind, party_id });
        }
        "2" => run(ledger, LedgerCommand::ListParties { kind }),
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn update_party(ledger: &mut Ledger, prompt: &mut Prompt, kind: PartyKind) -> Result<()> {
    let Some(party_id) = prompt.number("Enter ID to update: ")? else {
        return Ok(());
    };
    // Show the current record first, like every update flow.
    run(ledger, LedgerCommand::GetParty { kind, party_id });

    let mut update = PartyUpdate::default();
    let Some(name) = prompt.optional("New Name (blank to keep): ")? else {
        return Ok(());
    };
    update.name = name;
    let Some(phone) = prompt.optional("New Phone (blank to keep): ")? else {
        return Ok(());
    };
    update.phone = phone;
    let Some(email) = prompt.optional("New Email (blank to keep): ")? else {
        return Ok(());
    };
    update.email = email;
    let Some(address) = prompt.optional("New Address (blank to keep): ")? else {
        return Ok(());
    };
    update.address = address;
    let Some(tax_id) = prompt.optional("New Tax ID (blank to keep): ")? else {
        return Ok(());
    };
    update.tax_id = tax_id;
    let Some(national_id) = prompt.optional("New National ID (blank to keep): ")? else {
        return Ok(());
    };
    update.national_id = national_id;

    if kind == PartyKind::Investor {
        let Some(heir_name) = prompt.optional("New Legal Heir Name (blank to keep): ")? else {
            return Ok(());
        };
        update.heir_name = heir_name;
        let Some(heir_tax_id) = prompt.optional("New Legal Heir Tax ID (blank to keep): ")? else {
            return Ok(());
        };
        update.heir_tax_id = heir_tax_id;
    }

    if kind == PartyKind::Firm {
        let Some(registered_date) =
            prompt.optional("New Registered Date YYYY-MM-DD (blank to keep): ")?
        else {
            return Ok(());
        };
        if let Some(raw) = registered_date {
            match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => update.registered_date = Some(date),
                Err(_) => println!("Invalid date, keeping the current value."),
            }
        }
        let Some(members) = prompt.optional_number("New Member Count (blank to keep): ")? else {
            return Ok(());
        };
        update.members = members;
        let Some(percent_owned) = prompt.optional_number("New Percent Owned (blank to keep): ")?
        else {
            return Ok(());
        };
        update.percent_owned = percent_owned;
        let Some(firm_state) = prompt.optional("New Firm State (blank to keep): ")? else {
            return Ok(());
        };
        update.firm_state = firm_state;
    }

    println!("Linked account options:");
    println!("1. Replace all links");
    println!("2. Add links");
    println!("3. Remove links");
    println!("4. Clear all links");
    println!("0. Keep as they are");
    let Some(choice) = prompt.line("Enter your choice: ")? else {
        return Ok(());
    };
    update.links = match choice.as_str() {
        "1" => {
            let Some(account_ids) = prompt.id_list("Account IDs (comma-separated): ")? else {
                return Ok(());
            };
            Some(LinkUpdate::Replace { account_ids })
        }
        "2" => {
            let Some(account_ids) = prompt.id_list("Account IDs to add (comma-separated): ")?
            else {
                return Ok(());
            };
            Some(LinkUpdate::Add { account_ids })
        }
        "3" => {
            let Some(account_ids) = prompt.id_list("Account IDs to remove (comma-separated): ")?
            else {
                return Ok(());
            };
            Some(LinkUpdate::Remove { account_ids })
        }
        "4" => Some(LinkUpdate::Clear),
        _ => None,
    };

    run(
        ledger,
        LedgerCommand::UpdateParty {
            kind,
            party_id,
            update,
        },
    );
    Ok(())
}

// ── Asset operations ──────────────────────────────────────────────

fn add_asset(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(asset_type) = prompt.choice("Select Asset Type:", AssetType::ALL)? else {
        return Ok(());
    };
    let Some(asset_mode) = prompt.choice("Select Asset Mode:", AssetMode::ALL)? else {
        return Ok(());
    };
    let Some(holder_name) = prompt.required("Enter Holder Name: ")? else {
        return Ok(());
    };
    let Some(deed_id) = prompt.required("Enter Deed ID: ")? else {
        return Ok(());
    };
    let Some(size) = prompt.number("Enter Size: ")? else {
        return Ok(());
    };
    let Some(units) = prompt.choice("Select Units:", SizeUnit::ALL)? else {
        return Ok(());
    };

    run(
        ledger,
        LedgerCommand::CreateAsset {
            draft: AssetDraft {
                asset_type,
                asset_mode,
                holder_name,
                deed_id,
                size,
                units,
            },
        },
    );
    Ok(())
}

fn view_asset(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    println!("1. View a specific asset by id");
    println!("2. View all assets");
    let Some(choice) = prompt.line("Enter your choice: ")? else {
        return Ok(());
    };
    match choice.as_str() {
        "1" => {
            let Some(asset_id) = prompt.number("Enter Asset ID: ")? else {
                return Ok(());
            };
            run(ledger, LedgerCommand::GetAsset { asset_id });
        }
        "2" => run(ledger, LedgerCommand::ListAssets),
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn update_asset(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(asset_id) = prompt.number("Enter Asset ID to update: ")? else {
        return Ok(());
    };
    run(ledger, LedgerCommand::GetAsset { asset_id });

    let mut update = AssetUpdate::default();
    if let Some(Some(answer)) = prompt.optional("Change asset type? (y to choose): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let Some(asset_type) = prompt.choice("Select Asset Type:", AssetType::ALL)? else {
                return Ok(());
            };
            update.asset_type = Some(asset_type);
        }
    }
    if let Some(Some(answer)) = prompt.optional("Change asset mode? (y to choose): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let Some(asset_mode) = prompt.choice("Select Asset Mode:", AssetMode::ALL)? else {
                return Ok(());
            };
            update.asset_mode = Some(asset_mode);
        }
    }
    let Some(holder_name) = prompt.optional("New Holder Name (blank to keep): ")? else {
        return Ok(());
    };
    update.holder_name = holder_name;
    let Some(deed_id) = prompt.optional("New Deed ID (blank to keep): ")? else {
        return Ok(());
    };
    update.deed_id = deed_id;
    let Some(size) = prompt.optional_number("New Size (blank to keep): ")? else {
        return Ok(());
    };
    update.size = size;
    if let Some(Some(answer)) = prompt.optional("Change units? (y to choose): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let Some(units) = prompt.choice("Select Units:", SizeUnit::ALL)? else {
                return Ok(());
            };
            update.units = Some(units);
        }
    }

    run(ledger, LedgerCommand::UpdateAsset { asset_id, update });
    Ok(())
}

// ── Loan operations ───────────────────────────────────────────────

fn add_loan(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(name) = prompt.required("Enter Loan Name: ")? else {
        return Ok(());
    };
    let Some(recipient_tax_id) = prompt.checked(
        "Enter Recipient Tax ID: ",
        "Invalid tax id: must match the shape ABCDE1234F.",
        validate::tax_id_is_valid,
    )?
    else {
        return Ok(());
    };
    let Some(principal) = prompt.number("Enter Principal: ")? else {
        return Ok(());
    };
    let Some(interest_rate) = prompt.number("Enter Interest Rate: ")? else {
        return Ok(());
    };
    let Some(interest_frequency) =
        prompt.choice("Select Interest Frequency:", InterestFrequency::ALL)?
    else {
        return Ok(());
    };
    let Some(interest_expected) =
        prompt.optional_number("Enter Interest Expected (blank for none): ")?
    else {
        return Ok(());
    };
    let Some(interest_realized) =
        prompt.optional_number("Enter Interest Realized (blank for none): ")?
    else {
        return Ok(());
    };
    let Some(interest_paid_up) =
        prompt.optional_number("Enter Interest Paid Up (blank for none): ")?
    else {
        return Ok(());
    };
    let Some(state) = prompt.required("Enter Loan State (Active, Inactive, Closed): ")? else {
        return Ok(());
    };
    let Some(asset_id) = prompt.optional_number("Enter Asset ID (blank for none): ")? else {
        return Ok(());
    };

    run(
        ledger,
        LedgerCommand::CreateLoan {
            draft: LoanDraft {
                name,
                recipient_tax_id,
                principal,
                interest_rate,
                interest_frequency,
                interest_expected,
                interest_realized,
                interest_paid_up,
                state,
                asset_id,
            },
        },
    );
    Ok(())
}

fn view_loan(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    println!("1. View a specific loan by id");
    println!("2. View all loans");
    let Some(choice) = prompt.line("Enter your choice: ")? else {
        return Ok(());
    };
    match choice.as_str() {
        "1" => {
            let Some(loan_id) = prompt.number("Enter Loan ID: ")? else {
                return Ok(());
            };
            run(ledger, LedgerCommand::GetLoan { loan_id });
        }
        "2" => run(ledger, LedgerCommand::ListLoans),
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn update_loan(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(loan_id) = prompt.number("Enter Loan ID to update: ")? else {
        return Ok(());
    };
    run(ledger, LedgerCommand::GetLoan { loan_id });
    println!("Leave a field blank to keep the current value.");

    let mut update = LoanUpdate::default();
    let Some(name) = prompt.optional("New Loan Name: ")? else {
        return Ok(());
    };
    update.name = name;
    let Some(recipient) = prompt.optional("New Recipient: ")? else {
        return Ok(());
    };
    update.recipient = recipient;
    let Some(principal) = prompt.optional_number("New Principal: ")? else {
        return Ok(());
    };
    update.principal = principal;
    let Some(interest_rate) = prompt.optional_number("New Interest Rate: ")? else {
        return Ok(());
    };
    update.interest_rate = interest_rate;
    if let Some(Some(answer)) = prompt.optional("Change interest frequency? (y to choose): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let Some(frequency) =
                prompt.choice("Select Interest Frequency:", InterestFrequency::ALL)?
            else {
                return Ok(());
            };
            update.interest_frequency = Some(frequency);
        }
    }
    let Some(interest_expected) = prompt.optional_number("New Expected Interest: ")? else {
        return Ok(());
    };
    update.interest_expected = interest_expected;
    let Some(interest_realized) = prompt.optional_number("New Realized Interest: ")? else {
        return Ok(());
    };
    update.interest_realized = interest_realized;
    let Some(interest_paid_up) = prompt.optional_number("New Paid-Up Interest: ")? else {
        return Ok(());
    };
    update.interest_paid_up = interest_paid_up;
    let Some(expenses) = prompt.optional_number("New Expenses: ")? else {
        return Ok(());
    };
    update.expenses = expenses;
    let Some(state) = prompt.optional("New Loan State: ")? else {
        return Ok(());
    };
    update.state = state;
    let Some(asset_id) = prompt.optional_number("New Asset ID: ")? else {
        return Ok(());
    };
    update.asset_id = asset_id;

    run(ledger, LedgerCommand::UpdateLoan { loan_id, update });
    Ok(())
}

// ── Transaction operations ────────────────────────────────────────

fn add_transaction(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(txn_type) = prompt.choice("Select Transaction Type:", TxnType::ALL)? else {
        return Ok(());
    };
    let mut expense_subtype = None;
    if txn_type.requires_subtype() {
        let Some(subtype) =
            prompt.choice("Select Business Expense Subtype:", ExpenseSubtype::ALL)?
        else {
            return Ok(());
        };
        expense_subtype = Some(subtype);
    }
    let Some(amount) = prompt.number("Enter Transaction Amount: ")? else {
        return Ok(());
    };
    let Some(mode) = prompt.choice("Select Transaction Mode:", TxnMode::ALL)? else {
        return Ok(());
    };
    let Some(date) = prompt.date("Enter Date (YYYY-MM-DD): ")? else {
        return Ok(());
    };
    let Some(from_account) = prompt.optional_number("From Account ID (blank for none): ")? else {
        return Ok(());
    };
    let Some(to_account) = prompt.optional_number("To Account ID (blank for none): ")? else {
        return Ok(());
    };
    let Some(loan_id) = prompt.optional_number("Loan ID (blank for none): ")? else {
        return Ok(());
    };
    let Some(via) = prompt.optional("Via (blank for none): ")? else {
        return Ok(());
    };
    let Some(notes) = prompt.optional("Notes (blank for none): ")? else {
        return Ok(());
    };

    run(
        ledger,
        LedgerCommand::RecordTransaction {
            draft: TransactionDraft {
                txn_type,
                expense_subtype,
                amount,
                mode,
                date,
                from_account,
                to_account,
                loan_id,
                via,
                notes,
            },
        },
    );
    Ok(())
}

fn view_transaction(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    println!("1. View a specific transaction by id");
    println!("2. View all transactions");
    let Some(choice) = prompt.line("Enter your choice: ")? else {
        return Ok(());
    };
    match choice.as_str() {
        "1" => {
            let Some(txn_id) = prompt.number("Enter Transaction ID: ")? else {
                return Ok(());
            };
            run(ledger, LedgerCommand::GetTransaction { txn_id });
        }
        "2" => run(ledger, LedgerCommand::ListTransactions),
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn update_transaction(ledger: &mut Ledger, prompt: &mut Prompt) -> Result<()> {
    let Some(txn_id) = prompt.number("Enter Transaction ID to update: ")? else {
        return Ok(());
    };
    run(ledger, LedgerCommand::GetTransaction { txn_id });
    println!("Leave a field blank to keep the current value.");
    println!("Note: editing never re-adjusts loan balances.");

    let mut update = TransactionUpdate::default();
    if let Some(Some(answer)) = prompt.optional("Change transaction type? (y to choose): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let Some(txn_type) = prompt.choice("Select Transaction Type:", TxnType::ALL)? else {
                return Ok(());
            };
            update.txn_type = Some(txn_type);
            if txn_type.requires_subtype() {
                let Some(subtype) =
                    prompt.choice("Select Business Expense Subtype:", ExpenseSubtype::ALL)?
                else {
                    return Ok(());
                };
                update.expense_subtype = Some(subtype);
            }
        }
    }
    let Some(amount) = prompt.optional_number("New Amount: ")? else {
        return Ok(());
    };
    update.amount = amount;
    if let Some(Some(answer)) = prompt.optional("Change mode? (y to choose): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let Some(mode) = prompt.choice("Select Transaction Mode:", TxnMode::ALL)? else {
                return Ok(());
            };
            update.mode = Some(mode);
        }
    }
    let Some(date) = prompt.optional("New Date YYYY-MM-DD (blank to keep): ")? else {
        return Ok(());
    };
    if let Some(raw) = date {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => update.date = Some(date),
            Err(_) => println!("Invalid date, keeping the current value."),
        }
    }
    let Some(from_account) = prompt.optional_number("New From Account ID: ")? else {
        return Ok(());
    };
    update.from_account = from_account;
    let Some(to_account) = prompt.optional_number("New To Account ID: ")? else {
        return Ok(());
    };
    update.to_account = to_account;
    let Some(loan_id) = prompt.optional_number("New Loan ID: ")? else {
        return Ok(());
    };
    update.loan_id = loan_id;
    let Some(via) = prompt.optional("New Via: ")? else {
        return Ok(());
    };
    update.via = via;
    let Some(notes) = prompt.optional("New Notes: ")? else {
        return Ok(());
    };
    update.notes = notes;

    run(ledger, LedgerCommand::UpdateTransaction { txn_id, update });
    Ok(())
}

// ── Rendering ─────────────────────────────────────────────────────

fn render(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Account(account) => print_account(account),
        CommandOutcome::Accounts(accounts) => {
            if accounts.is_empty() {
                println!("No accounts found.");
            }
            for account in accounts {
                print_account(account);
                println!("{}", "-".repeat(40));
            }
        }
        CommandOutcome::Party(party) => print_party(party),
        CommandOutcome::Parties(parties) => {
            if parties.is_empty() {
                println!("No records found.");
            }
            for party in parties {
                print_party(party);
                println!("{}", "-".repeat(40));
            }
        }
        CommandOutcome::PartyChanged { record, links } => {
            print_party(record);
            print_link_report(links);
        }
        CommandOutcome::Asset(asset) => print_asset(asset),
        CommandOutcome::Assets(assets) => {
            if assets.is_empty() {
                println!("No assets found.");
            }
            for asset in assets {
                print_asset(asset);
                println!("{}", "-".repeat(40));
            }
        }
        CommandOutcome::Loan(loan) => print_loan(loan),
        CommandOutcome::Loans(loans) => {
            if loans.is_empty() {
                println!("No loans found.");
            }
            for loan in loans {
                print_loan(loan);
                println!("{}", "-".repeat(40));
            }
        }
        CommandOutcome::Transaction(txn) => print_transaction(txn),
        CommandOutcome::Transactions(txns) => {
            if txns.is_empty() {
                println!("No transactions found.");
            }
            for txn in txns {
                print_transaction(txn);
                println!("{}", "-".repeat(40));
            }
        }
    }
}

fn opt_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

fn opt_id(value: &Option<RecordId>) -> String {
    value.map_or_else(|| "None".to_string(), |id| id.to_string())
}

fn opt_amount(value: &Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |a| a.to_string())
}

fn print_account(account: &AccountRecord) {
    println!("Account ID:   {}", account.account_id);
    println!("Holder Name:  {}", account.holder_name);
    println!("Bank Name:    {}", account.bank_name);
    println!("Routing Code: {}", account.routing_code);
    println!("Number:       {}", account.number);
    println!("Branch:       {}", account.branch);
    println!("Account Type: {}", account.account_type);
    println!("Owner Party:  {}", opt_id(&account.owner_party_id));
}

fn print_party(party: &PartyRecord) {
    println!("ID:          {}", party.party_id);
    println!("Kind:        {}", party.kind);
    println!("Name:        {}", party.name);
    println!("Phone:       {}", party.phone);
    println!("Email:       {}", party.email);
    println!("Address:     {}", party.address);
    println!("Tax ID:      {}", party.tax_id);
    println!("National ID: {}", party.national_id);
    if party.kind == PartyKind::Investor {
        println!("Legal Heir:  {}", opt_text(&party.heir_name));
        println!("Heir Tax ID: {}", opt_text(&party.heir_tax_id));
    }
    if let Some(firm) = &party.firm {
        println!("Registered:  {}", firm.registered_date);
        println!("Members:     {}", firm.members);
        println!("Owned (%):   {}", firm.percent_owned);
        println!("Firm State:  {}", firm.state);
    }
    let links = party
        .account_links
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Linked Accounts: {}",
        if links.is_empty() { "None" } else { &links }
    );
}

fn print_link_report(report: &LinkReport) {
    for skip in &report.skipped {
        println!(
            "Account {}: {}. Skipping.",
            skip.account_id,
            skip.reason.describe()
        );
    }
}

fn print_asset(asset: &AssetRecord) {
    println!("Asset ID:    {}", asset.asset_id);
    println!("Asset Type:  {}", asset.asset_type);
    println!("Asset Mode:  {}", asset.asset_mode);
    println!("Holder Name: {}", asset.holder_name);
    println!("Deed ID:     {}", asset.deed_id);
    println!("Size:        {} {}", asset.size, asset.units);
}

fn print_loan(loan: &LoanRecord) {
    println!("Loan ID:            {}", loan.loan_id);
    println!("Name:               {}", loan.name);
    println!("Recipient:          {}", loan.recipient);
    println!("Principal:          {}", loan.principal);
    println!("Interest Rate:      {}", loan.interest_rate);
    println!("Interest Frequency: {}", loan.interest_frequency);
    println!("Interest Expected:  {}", opt_amount(&loan.interest_expected));
    println!("Interest Realized:  {}", opt_amount(&loan.interest_realized));
    println!("Interest Paid Up:   {}", opt_amount(&loan.interest_paid_up));
    println!("Expenses:           {}", loan.expenses);
    println!("Loan State:         {}", loan.state);
    println!("Asset ID:           {}", opt_id(&loan.asset_id));
}

fn print_transaction(txn: &TransactionRecord) {
    println!("Transaction ID: {}", txn.txn_id);
    println!("Type:           {}", txn.txn_type);
    println!(
        "Subtype:        {}",
        txn.expense_subtype.map_or("N/A", |s| s.as_str())
    );
    println!("Amount:         {}", txn.amount);
    println!("Mode:           {}", txn.mode);
    println!("Date:           {}", txn.date);
    println!("From Account:   {}", opt_id(&txn.from_account));
    println!("To Account:     {}", opt_id(&txn.to_account));
    println!("Loan ID:        {}", opt_id(&txn.loan_id));
    println!("Via:            {}", opt_text(&txn.via));
    println!("Notes:          {}", opt_text(&txn.notes));
}
