use anyhow::{bail, Context};
use autoprop::config::{AttributeConfig, TypeConfig, CONFIG_FILENAME};
use autoprop::{observer, AttributeOptions, ChangeLog, ManagedType, Record, Value};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::cell::RefCell;
use std::rc::Rc;

mod args;
mod page;
use args::{Cli, Commands};
use page::Page;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();
}

/// The model of the page example: one text field per attribute, redrawn by
/// the attribute's observer.
struct AppContext {
    model: Record,
    page: Rc<RefCell<Page>>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Script) => handle_script(),
        Some(Commands::Schema) => handle_schema(&load_model_config(&cli)?),
        Some(Commands::Increment { times }) => {
            let ctx = init_context(&cli)?;
            handle_increment(&ctx, times)
        }
        Some(Commands::Weather { ref value }) => {
            let ctx = init_context(&cli)?;
            handle_weather(&ctx, value)
        }
        Some(Commands::Clear { ref name }) => {
            let ctx = init_context(&cli)?;
            handle_clear(&ctx, name)
        }
        Some(Commands::Show) | None => {
            let ctx = init_context(&cli)?;
            print_summary(&ctx);
            Ok(())
        }
    }
}

fn builtin_model() -> TypeConfig {
    TypeConfig {
        name: "Model".to_string(),
        attributes: vec![
            AttributeConfig::new("counter", 100),
            AttributeConfig::new("weather", "sunny"),
        ],
    }
}

/// `--config`, then the user config dir, then the built-in model.
fn load_model_config(cli: &Cli) -> anyhow::Result<TypeConfig> {
    if let Some(path) = &cli.config {
        return TypeConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    if let Some(dirs) = ProjectDirs::from("com", "autoprop", "autoprop") {
        let path = dirs.config_dir().join(CONFIG_FILENAME);
        if let Some(config) = TypeConfig::load_optional(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?
        {
            tracing::debug!(path = %path.display(), "Loaded model config");
            return Ok(config);
        }
    }

    Ok(builtin_model())
}

/// Build the page and the model, wire one observer per field, and boot so
/// the page shows the initial state.
fn init_context(cli: &Cli) -> anyhow::Result<AppContext> {
    let config = load_model_config(cli)?;
    let page = Rc::new(RefCell::new(Page::new()));

    let ty = config.build_with(|name| {
        let field = page.borrow_mut().add(name);
        let page = Rc::clone(&page);
        Some(observer(move |_, value| {
            let mut page = page.borrow_mut();
            page.set_value(field, value.to_string());
            page.update();
        }))
    })?;

    let model = Record::new(ty);
    model.boot()?;

    Ok(AppContext { model, page })
}

fn handle_increment(ctx: &AppContext, times: u32) -> anyhow::Result<()> {
    for _ in 0..times {
        let current = ctx.model.get("counter")?;
        let next = match current {
            Value::Int(n) => match n.checked_add(1) {
                Some(next) => Value::Int(next),
                None => bail!("counter overflowed"),
            },
            Value::Float(n) => Value::Float(n + 1.0),
            other => bail!("counter is not a number: {}", other),
        };
        ctx.model.set("counter", next)?;
    }
    print_summary(ctx);
    Ok(())
}

fn handle_weather(ctx: &AppContext, value: &str) -> anyhow::Result<()> {
    ctx.model.set("weather", value)?;
    print_summary(ctx);
    Ok(())
}

fn handle_clear(ctx: &AppContext, name: &str) -> anyhow::Result<()> {
    ctx.model.set(name, Value::Null)?;
    print_summary(ctx);
    Ok(())
}

fn handle_schema(config: &TypeConfig) -> anyhow::Result<()> {
    let ty = config.build_with(|_| None)?;
    println!("{}", ty.name().bold());
    for spec in ty.specs() {
        let mut flags = Vec::new();
        if spec.readable {
            flags.push("read");
        }
        if spec.writable {
            flags.push("write");
        }
        if spec.allow_null {
            flags.push("null");
        }
        println!(
            "  {} = {} ({})",
            spec.name.yellow(),
            spec.default_value,
            flags.join(", ").dimmed()
        );
    }
    for name in ty.misconfigured() {
        println!(
            "{}",
            format!("warning: {} has a null default but does not allow null", name).yellow()
        );
    }
    Ok(())
}

/// The console walkthrough: declare counter, total and weather, boot, then
/// make a handful of changes, printing every notification.
fn handle_script() -> anyhow::Result<()> {
    let log = ChangeLog::new();
    let print_change = observer(|name, value| {
        println!("observing change in {} to {}", name, value);
    });
    let print_weather = observer(|_, value| {
        println!("weather changed to {}", value);
    });

    let ty = ManagedType::builder("ExampleModel")
        .declare(
            "counter",
            AttributeOptions::new()
                .default_value(10)
                .on_change(chain(print_change.clone(), log.observer())),
        )?
        .declare(
            "total",
            AttributeOptions::new()
                .default_value(0)
                .on_change(chain(print_change, log.observer())),
        )?
        .declare(
            "weather",
            AttributeOptions::new()
                .default_value("sunny")
                .on_change(chain(print_weather, log.observer())),
        )?
        .build();

    let model = Record::new(ty);
    let names: Vec<_> = model.managed_type().attribute_names().collect();
    println!("attributes are {}", names.join(", "));

    let initial: Vec<String> = model
        .snapshot()
        .into_iter()
        .map(|(name, value)| format!("{} {}", name, value))
        .collect();
    println!("initial values {}", initial.join(" "));

    model.boot()?;
    model.set("counter", 100)?;
    model.set("counter", 200)?;
    model.update("total", |v| Value::Int(v.as_int().unwrap_or_default() + 1))?;
    model.set("weather", "stormy")?;

    println!("{}", format!("{} notifications", log.len()).dimmed());
    Ok(())
}

fn chain(first: autoprop::Observer, second: autoprop::Observer) -> autoprop::Observer {
    observer(move |name, value| {
        first(name, value);
        second(name, value);
    })
}

fn print_summary(ctx: &AppContext) {
    let renders = ctx.page.borrow().renders();
    println!("{}", format!("{} renders", renders).dimmed());
    for (name, value) in ctx.model.snapshot() {
        println!("{} = {}", name.green(), value);
    }
}
