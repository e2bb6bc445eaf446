//! Console driver for the ordering terminal
//!
//! Plays the role of the external UI collaborator: renders the visible
//! frame's view-model as plain text, maps input lines to `UiEvent`s, and
//! pumps the asset cache and toast queue once per turn. No ordering logic
//! lives here.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use kafe_terminal::app::{AppContext, Navigator};
use kafe_terminal::assets::AssetCache;
use kafe_terminal::config;
use kafe_terminal::domain::catalog::CategoryFilter;
use kafe_terminal::domain::tables::{TableId, TableRegistry};
use kafe_terminal::ui::format::format_price;
use kafe_terminal::ui::{
    BackgroundState, LandingPage, PageBody, PageMode, PageView, UiEvent,
};

#[derive(Parser)]
#[command(name = "kafe-terminal", about = "Ordering terminal for Kafe Daun-Daun Pacilkom")]
struct Args {
    /// Menu source file
    #[arg(long, default_value = "menu.txt")]
    menu: PathBuf,

    /// Number of table slots
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..))]
    tables: u8,

    /// Fixed RNG seed for table assignment (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(Level::WARN)
        .init();

    // A malformed menu source is fatal: abort startup.
    let catalog = match config::load_menu(&args.menu) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("fatal: {err}");
            return ExitCode::FAILURE;
        }
    };

    let tables = match args.seed {
        Some(seed) => TableRegistry::with_seed(args.tables, seed),
        None => TableRegistry::new(args.tables),
    };
    let mut ctx = AppContext::new(catalog, tables, AssetCache::new());
    let mut nav = Navigator::new(&mut ctx, || Box::new(LandingPage::new()));

    let stdin = io::stdin();
    loop {
        ctx.assets.poll();
        for toast in nav.take_toasts() {
            println!("[!] {}", toast.message);
        }

        let view = nav.view(&ctx);
        render(&view);
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        match parse_event(input, &view, ctx.tables.table_count()) {
            Some(event) => nav
                .dispatch(&mut ctx, event)
                .expect("base frame is permanent"),
            None => print_help(&view),
        }
    }

    ExitCode::SUCCESS
}

fn filter_name(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "ALL",
        CategoryFilter::Only(category) => category.name(),
    }
}

fn render(view: &PageView) {
    println!();
    println!("=== {} ===", view.title);
    match view.background {
        BackgroundState::Pending => println!("(memuat gambar...)"),
        BackgroundState::Ready | BackgroundState::Unavailable => {}
    }

    match &view.body {
        PageBody::Landing => {
            println!("1. Buat Pesanan");
            println!("2. Selesai Gunakan Meja");
        }
        PageBody::NameEntry { name } => {
            println!("Siapa nama Anda? [{name}]");
        }
        PageBody::Menu {
            mode,
            filter,
            customer,
            table,
            rows,
            total,
        } => {
            println!("Nama pemesan: {customer}");
            match table {
                Some(t) => println!("No Meja: {t}"),
                None => println!("No Meja: -"),
            }
            println!("Kategori: {}", filter_name(*filter));
            for row in rows {
                println!(
                    "  {:<4} {:<24} Rp{:>9}  {}: {}  jumlah: {}",
                    row.id,
                    row.name,
                    format_price(row.unit_price),
                    row.attribute_label,
                    row.attribute_value,
                    row.quantity
                );
            }
            println!("Total harga: Rp{}", format_price(*total));
            if *mode == PageMode::Checkout {
                println!("(ok = selesai gunakan meja)");
            }
        }
        PageBody::Tables { mode, slots, .. } => {
            match mode {
                PageMode::Order => println!("Silakan pilih meja kosong yang diinginkan"),
                PageMode::Checkout => println!("Silakan pilih meja yang selesai digunakan"),
            }
            for slot in slots {
                let status = if slot.occupied { "terisi" } else { "kosong" };
                let marker = if slot.selected { " <= meja Anda" } else { "" };
                println!("  meja {:>2} [{status}]{marker}", slot.table);
            }
        }
    }
}

fn parse_event(input: &str, view: &PageView, table_count: u8) -> Option<UiEvent> {
    if input.eq_ignore_ascii_case("back") {
        return Some(UiEvent::Back);
    }

    match &view.body {
        PageBody::Landing => match input {
            "1" => Some(UiEvent::StartOrder),
            "2" => Some(UiEvent::StartCheckout),
            _ => None,
        },
        PageBody::NameEntry { .. } => {
            if input.eq_ignore_ascii_case("ok") {
                Some(UiEvent::Submit)
            } else if input.is_empty() {
                None
            } else {
                Some(UiEvent::Input(input.to_string()))
            }
        }
        PageBody::Menu { mode, .. } => {
            if input.eq_ignore_ascii_case("ok") {
                return Some(UiEvent::Submit);
            }
            if *mode == PageMode::Checkout {
                return None;
            }
            if input.eq_ignore_ascii_case("meja") {
                return Some(UiEvent::ChangeTable);
            }
            if let Some(rest) = input.strip_prefix("filter ") {
                return CategoryFilter::parse(rest.trim()).map(UiEvent::Filter);
            }
            let mut parts = input.splitn(3, ' ');
            if parts.next() == Some("set") {
                let entry_id = parts.next()?.to_string();
                let quantity = parts.next().unwrap_or("").to_string();
                return Some(UiEvent::SetQuantity {
                    entry_id,
                    input: quantity,
                });
            }
            None
        }
        PageBody::Tables { .. } => {
            if input.eq_ignore_ascii_case("ok") {
                return Some(UiEvent::Submit);
            }
            let table: TableId = input.parse().ok()?;
            (1..=table_count).contains(&table).then_some(UiEvent::ChooseTable(table))
        }
    }
}

fn print_help(view: &PageView) {
    match &view.body {
        PageBody::Landing => println!("perintah: 1, 2, quit"),
        PageBody::NameEntry { .. } => println!("perintah: <nama>, ok, back, quit"),
        PageBody::Menu { mode: PageMode::Order, .. } => {
            println!("perintah: set <kode> <jumlah>, filter ALL|MEALS|DRINKS|SIDES, meja, ok, back, quit");
        }
        PageBody::Menu { mode: PageMode::Checkout, .. } => println!("perintah: ok, back, quit"),
        PageBody::Tables { .. } => println!("perintah: <nomor meja>, ok, back, quit"),
    }
}
