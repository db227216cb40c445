// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use news_search::utils::logging::{
    ansi_from_markup, format_error, format_heading, format_info, format_success, format_warning,
    on_hex_color,
};
use news_search::{
    Article, ArticleParser, Config, HighlightTerms, JsonExporter, Lang, NewsSearch, SearchOutcome,
    SearchSession,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

const PREVIEW_CHARS: usize = 600;

#[derive(Parser)]
#[command(name = "news_search")]
#[command(version = "0.1.0")]
#[command(about = "Bilingual (English/Gujarati) tag-based news search", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the corpus with a free-text query
    Search {
        /// Query text, English or Gujarati
        query: String,

        #[arg(short, long, default_value = "en", value_name = "LANG")]
        output_lang: Lang,

        /// Write the results as JSON into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        /// Print each article's original text instead of the formatted one
        #[arg(long)]
        show_original: bool,

        /// Print the raw HTML markup and legend
        #[arg(long)]
        html: bool,
    },

    /// Line-oriented search session
    Interactive {
        #[arg(short, long, default_value = "en", value_name = "LANG")]
        output_lang: Lang,
    },

    /// Corpus statistics
    Stats,

    /// List corpus files matching the configured name pattern
    Files,

    /// Parse an article file and print its fields
    Parse {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    news_search::utils::logging::init_logger(cli.color, cli.verbose);
    if !cli.color {
        colored::control::set_override(false);
    }

    info!("News Search");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Search {
            query,
            output_lang,
            export,
            pretty,
            show_original,
            html,
        } => {
            cmd_search(&config, &query, output_lang, export, pretty, show_original, html).await?;
        }
        Commands::Interactive { output_lang } => {
            cmd_interactive(&config, output_lang).await?;
        }
        Commands::Stats => {
            cmd_stats(&config).await?;
        }
        Commands::Files => {
            cmd_files(&config).await?;
        }
        Commands::Parse { file } => {
            cmd_parse(&file).await?;
        }
    }

    Ok(())
}

fn build_engine(config: &Config, show_progress: bool) -> Result<NewsSearch> {
    if config.model.api_key.is_none() {
        warn!("HUGGINGFACE_API_KEY is not set; queries cannot be interpreted");
    }

    let engine = NewsSearch::from_config(config).context("Failed to initialize search")?;
    Ok(engine.with_progress(show_progress))
}

async fn cmd_search(
    config: &Config,
    query: &str,
    output_lang: Lang,
    export: Option<PathBuf>,
    pretty: bool,
    show_original: bool,
    html: bool,
) -> Result<()> {
    info!("Searching for: {}", query);

    let engine = build_engine(config, true)?;
    let outcome = engine.search(query, output_lang).await;
    let terms = engine.highlight_terms(&outcome.interpretation.tags);

    print_outcome(&engine, &outcome, &terms, html).await;
    for (index, article) in outcome.articles.iter().enumerate() {
        print_article(index, article, &terms, show_original, html);
    }

    if let Some(dir) = export {
        let exporter = JsonExporter::new(dir)?;
        let manifest = exporter
            .export_outcome(&outcome, pretty)
            .context("Failed to export results")?;
        println!(
            "{}",
            format_success(&format!(
                "Exported {} articles to {}",
                manifest.total_articles,
                exporter.output_dir().display()
            ))
        );
    }

    Ok(())
}

async fn cmd_interactive(config: &Config, mut output_lang: Lang) -> Result<()> {
    let engine = build_engine(config, false)?;
    let mut session = SearchSession::new();
    let mut last: Option<SearchOutcome> = None;

    println!("{}", format_info("Type a query, or :help for commands"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("", _) => continue,
            (":quit" | ":q", _) => break,
            (":help", _) => print_interactive_help(),
            (":history", _) => {
                for (index, entry) in session.history().iter().enumerate() {
                    println!(
                        "{:>3}. [{}] {} -> tags {:?}, date {}, {} result(s)",
                        index + 1,
                        entry.searched_at.format("%H:%M:%S"),
                        entry.query,
                        entry.tags,
                        entry.date.as_deref().unwrap_or("-"),
                        entry.result_count
                    );
                }
            }
            (":lang", value) => match value.trim().parse::<Lang>() {
                Ok(lang) => {
                    output_lang = lang;
                    println!("{}", format_success(&format!("Output language: {}", lang.display_name())));
                }
                Err(e) => println!("{}", format_error(&e)),
            },
            (":original", value) => {
                let Some(outcome) = &last else {
                    println!("{}", format_warning("No results yet"));
                    continue;
                };

                match value.trim().parse::<usize>() {
                    Ok(number) if (1..=outcome.articles.len()).contains(&number) => {
                        let index = number - 1;
                        let showing = session.toggle_original(index);
                        let terms = engine.highlight_terms(session.current_tags());
                        print_article(index, &outcome.articles[index], &terms, showing, false);
                    }
                    _ => println!(
                        "{}",
                        format_error(&format!(
                            "Expected a result number between 1 and {}",
                            outcome.articles.len()
                        ))
                    ),
                }
            }
            _ if line.starts_with(':') => {
                println!("{}", format_error(&format!("Unknown command: {}", line)));
            }
            _ => {
                let outcome = engine.search(line, output_lang).await;
                session.record(
                    line,
                    outcome.detected_lang,
                    &outcome.interpretation,
                    outcome.articles.len(),
                );

                let terms = engine.highlight_terms(session.current_tags());
                print_outcome(&engine, &outcome, &terms, false).await;
                for (index, article) in outcome.articles.iter().enumerate() {
                    print_article(index, article, &terms, session.is_showing_original(index), false);
                }
                last = Some(outcome);
            }
        }
    }

    info!("Session ended after {} searches", session.history().len());
    Ok(())
}

fn print_interactive_help() {
    println!("  <query>        search (English or Gujarati)");
    println!("  :original N    toggle original text for result N");
    println!("  :lang en|gu    set the output language");
    println!("  :history       list searches in this session");
    println!("  :quit          leave");
}

async fn cmd_stats(config: &Config) -> Result<()> {
    info!("Gathering corpus statistics");

    let engine = build_engine(config, false)?;
    let stats = engine
        .store()
        .stats()
        .await
        .context("Failed to read corpus statistics")?;

    println!("{}", format_heading("Corpus Statistics"));
    println!("{}", stats.format());
    Ok(())
}

async fn cmd_files(config: &Config) -> Result<()> {
    let engine = build_engine(config, false)?;
    let entries = engine
        .store()
        .list_files()
        .await
        .context("Failed to list corpus files")?;

    for entry in &entries {
        println!("{}", entry.name);
    }
    info!("{} corpus files", entries.len());
    Ok(())
}

async fn cmd_parse(path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let articles = ArticleParser::new().parse_all(&content);
    if articles.is_empty() {
        println!("{}", format_warning("No articles found"));
        return Ok(());
    }

    let terms = HighlightTerms::new(&[], &[]);
    for (index, article) in articles.iter().enumerate() {
        print_article(index, article, &terms, false, false);
    }
    Ok(())
}

async fn print_outcome(engine: &NewsSearch, outcome: &SearchOutcome, terms: &HighlightTerms, html: bool) {
    println!();
    println!(
        "{}",
        format_info(&format!(
            "Detected language: {} | tags: {:?} | date: {}",
            outcome.detected_lang.display_name(),
            outcome.interpretation.tags,
            outcome.interpretation.date.as_deref().unwrap_or("any")
        ))
    );

    if outcome.articles.is_empty() {
        let message = engine
            .translate("No matching articles found.", outcome.output_lang)
            .await;
        println!("{}", format_warning(&message));
        return;
    }

    if html {
        println!("{}", outcome.legend);
    } else if !terms.is_empty() {
        let legend: Vec<String> = terms
            .terms()
            .iter()
            .map(|term| on_hex_color(&format!(" {} ", term.term), &term.color))
            .collect();
        println!("Search Terms: {}", legend.join(" "));
    }

    let heading = engine
        .results_heading(outcome.articles.len(), outcome.output_lang)
        .await;
    println!("{}", format_heading(&heading));
}

fn print_article(index: usize, article: &Article, terms: &HighlightTerms, show_original: bool, html: bool) {
    println!();
    println!("{}. {}", index + 1, format_heading(&article.title));
    println!("   Date: {}", article.date);
    if article.has_link() {
        println!("   Link: {}", article.link);
    }

    let body = if show_original {
        let plain = article.preview(PREVIEW_CHARS);
        if html {
            terms.highlight(&plain)
        } else {
            terms.highlight_with(&plain, |term, matched| on_hex_color(matched, &term.color))
        }
    } else if html {
        article.content.clone()
    } else {
        ansi_from_markup(&article.content)
    };

    let label = if show_original {
        format!("Original ({})", article.original_lang().display_name())
    } else {
        "Content".to_string()
    };
    println!("   {}:", label);
    for line in body.lines() {
        println!("     {}", line);
    }
}
