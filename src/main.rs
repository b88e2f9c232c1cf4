//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;

use clap::Parser as ClapParser;

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::filter::{FilterConfig, apply_filters, paginate};
use chatlens::loader::discover_chat_folders;
use chatlens::message::Message;
use chatlens::output::{OutputConfig, OutputFormat, write_to_format};
use chatlens::session::ChatSession;
use chatlens::stats::ChatStats;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let args = <Args as ClapParser>::parse();

    let session = if args.input.is_dir() {
        match ChatSession::open(&args.input) {
            Ok(session) => session,
            Err(e) => {
                // The selected folder may be the parent of the actual export.
                let candidates = discover_chat_folders(&args.input);
                if !candidates.is_empty() {
                    eprintln!("Found export folders inside {}:", args.input.display());
                    for folder in candidates.iter().take(5) {
                        eprintln!("  {}", folder.display());
                    }
                }
                return Err(e);
            }
        }
    } else {
        ChatSession::open_file(&args.input)?
    };

    println!("💬 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Chat:     {}", session.title());
    println!("📄 File:     {}", session.transcript_path().display());
    println!("🖼️  Media:    {} files in folder", session.media_files().len());

    let diag = session.transcript().diagnostics;
    println!(
        "📖 Parsed:   {} messages ({} continuation lines)",
        session.messages().len(),
        diag.continuation_lines
    );
    if diag.orphan_lines > 0 || diag.bad_timestamps > 0 {
        println!(
            "⚠️  Degraded: {} orphan lines discarded, {} bad timestamps",
            diag.orphan_lines, diag.bad_timestamps
        );
    }

    let filter_config = build_filter(&args)?;
    let filtered = apply_filters(session.messages(), &filter_config);

    if filter_config.is_active() || args.include_system {
        println!("🔍 Filtered: {} messages match", filtered.len());
    }
    println!();

    if args.stats {
        print_stats(&filtered);
    }

    match args.output {
        Some(ref path) => {
            let format: OutputFormat = args.format.into();
            let mut output_config = OutputConfig::new();
            if args.timestamps {
                output_config = output_config.with_timestamps();
            }
            if args.attachments {
                output_config = output_config.with_attachments();
            }

            write_to_format(filtered.iter().copied(), path, format, &output_config)?;
            println!("✅ Wrote {} messages to {} ({})", filtered.len(), path.display(), format);
        }
        None => print_page(&args, &filtered),
    }

    Ok(())
}

fn build_filter(args: &Args) -> Result<FilterConfig, ChatlensError> {
    let mut config = FilterConfig::new().with_system_messages(args.include_system);

    if let Some(ref after) = args.after {
        config = config.with_date_from(after)?;
    }
    if let Some(ref before) = args.before {
        config = config.with_date_to(before)?;
    }
    if let Some(ref from) = args.from {
        config = config.with_sender(from.clone());
    }
    if let Some(ref query) = args.query {
        config = config.with_query(query.clone());
    }

    Ok(config)
}

fn print_stats(messages: &[&Message]) {
    let stats = ChatStats::collect(messages.iter().copied());

    println!("📊 Statistics:");
    println!("   Messages:     {}", stats.total_messages);
    println!("   Participants: {}", stats.participants());
    println!("   With media:   {}", stats.media_messages);
    println!("   Days covered: {}", stats.days_covered());

    for (sender, count) in &stats.per_sender {
        println!("   {:20} {}", sender, count);
    }

    if let Some((day, count)) = stats.busiest_day() {
        println!("   Busiest day:  {} ({} messages)", day, count);
    }
    if let Some((weekday, hour, count)) = stats.busiest_slot() {
        println!(
            "   Peak hour:    {} {:02}:00 ({} messages)",
            WEEKDAYS[weekday], hour, count
        );
    }
    println!();
}

fn print_page(args: &Args, filtered: &[&Message]) {
    // Default to the newest page, like a chat view scrolled to the bottom.
    let page_number = args.page.unwrap_or(usize::MAX);
    let page = paginate(filtered, page_number, args.per_page);

    for msg in &page.items {
        let stamp = msg
            .timestamp
            .map(|ts| ts.format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_default();
        match msg.sender() {
            Some(sender) => println!("[{}] {}: {}", stamp, sender, msg.body),
            None => println!("[{}] ── {}", stamp, msg.body),
        }
    }

    println!();
    if page.total_items == 0 {
        println!("No messages match the current filters.");
    } else {
        println!(
            "Showing {}-{} of {} (page {}/{})",
            page.first_index,
            page.first_index + page.items.len() - 1,
            page.total_items,
            page.number,
            page.total_pages
        );
    }
}
