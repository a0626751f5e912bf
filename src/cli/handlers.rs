use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;

use crate::cli::commands::{Cli, Commands, DeleteArgs, ListArgs, SearchArgs, ShowArgs};
use crate::engine::core::Engine;
use crate::engine::notice::Notice;
use crate::model::config::DiaryConfig;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = DiaryConfig::load(Path::new("diary.toml"))?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.into();
    }

    let (mut engine, notices) = Engine::open(&config)?;
    // The initial listing is async; the CLI has nothing to do until it lands.
    engine.flush_io();

    match cli.command {
        Commands::List(args) => cmd_list(&mut engine, args),
        Commands::Show(args) => cmd_show(&mut engine, args)?,
        Commands::New => cmd_new(&mut engine)?,
        Commands::Delete(args) => cmd_delete(&mut engine, args)?,
        Commands::Search(args) => cmd_search(&mut engine, args),
    }

    engine.shutdown();
    report_errors(&notices);
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(engine: &mut Engine, args: ListArgs) {
    if let Some(term) = &args.search {
        engine.set_search_term(term);
    }
    print_entries(engine);
}

fn cmd_show(engine: &mut Engine, args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(term) = &args.search {
        engine.set_search_term(term);
    }
    if !engine.select(&args.id) {
        return Err(format!("no entry with id '{}'", args.id).into());
    }
    engine.flush_io();
    if let Some(content) = engine.render_content() {
        println!("{content}");
    }
    Ok(())
}

fn cmd_new(engine: &mut Engine) -> Result<(), Box<dyn std::error::Error>> {
    let id = engine.create_entry()?;
    engine.flush_io();
    println!("{id}");
    Ok(())
}

fn cmd_delete(engine: &mut Engine, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    if engine.list_entries().iter().all(|e| e.id() != args.id) {
        return Err(format!("no entry with id '{}'", args.id).into());
    }
    if !args.yes && !confirm(&format!("Delete entry {}? [y/N] ", args.id))? {
        return Ok(());
    }
    engine.delete_entry(&args.id)?;
    println!("deleted {}", args.id);
    Ok(())
}

fn cmd_search(engine: &mut Engine, args: SearchArgs) {
    engine.set_search_term(&args.term);
    print_entries(engine);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_entries(engine: &Engine) {
    for entry in engine.list_entries() {
        println!("{}  {}, {}", entry.id(), entry.title(), entry.time());
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

/// Surface any error notices the engine produced while we drove it.
fn report_errors(notices: &mpsc::Receiver<Notice>) {
    for notice in notices.try_iter() {
        if let Notice::Error { title, message } = notice {
            eprintln!("{title}: {message}");
        }
    }
}
