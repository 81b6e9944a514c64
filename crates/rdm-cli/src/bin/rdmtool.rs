use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use rdm_cli::commands::dict_ops::{self, EntryArgs};
use rdm_cli::commands::{config_ops, encode_ops, SaveOptions};
use rdm_cli::prompt::Console;
use rdm_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "rdmtool", about = "Rime dictionary manager")]
struct Cli {
    /// Settings TOML file (default: built-in settings)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,
    /// Write JSON trace lines to rdm-trace.jsonl in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

/// An entry: word, optional code, optional weight.
#[derive(Args)]
struct EntryArg {
    /// Word
    word: String,
    /// Code
    code: Option<String>,
    /// Weight (integer or percentage)
    weight: Option<String>,
}

impl From<EntryArg> for EntryArgs {
    fn from(a: EntryArg) -> Self {
        EntryArgs {
            word: a.word,
            code: a.code,
            weight: a.weight,
        }
    }
}

#[derive(Args)]
struct SaveArgs {
    /// Write the result here instead of over the source file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Keep source order instead of sorting entries by code
    #[arg(long)]
    unsorted: bool,
}

impl From<SaveArgs> for SaveOptions {
    fn from(a: SaveArgs) -> Self {
        SaveOptions {
            output: a.output,
            unsorted: a.unsorted,
        }
    }
}

#[derive(Args)]
struct EncoderArgs {
    /// Single-character source file
    #[arg(long)]
    chars: PathBuf,
    /// Input method (see `schemes`; default from settings)
    #[arg(long)]
    scheme: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show dictionary statistics
    Info {
        /// Dictionary file
        dict_file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up entries by code
    Lookup {
        /// Dictionary file
        dict_file: PathBuf,
        /// Code to look up
        code: String,
        /// Include every code starting with the query
        #[arg(long)]
        prefix: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up entries by word
    Word {
        /// Dictionary file
        dict_file: PathBuf,
        /// Word to look up
        word: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List entries sharing the word or the code of an entry
    Similar {
        /// Dictionary file
        dict_file: PathBuf,
        #[command(flatten)]
        entry: EntryArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an entry
    Add {
        /// Dictionary file
        dict_file: PathBuf,
        #[command(flatten)]
        entry: EntryArg,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Remove an entry
    Remove {
        /// Dictionary file
        dict_file: PathBuf,
        #[command(flatten)]
        entry: EntryArg,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Change the code or weight of an entry
    Modify {
        /// Dictionary file
        dict_file: PathBuf,
        #[command(flatten)]
        entry: EntryArg,
        /// New code
        #[arg(long = "new-code")]
        new_code: Option<String>,
        /// New weight (empty to drop it)
        #[arg(long = "new-weight")]
        new_weight: Option<String>,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Encode words with a character table
    Encode {
        #[command(flatten)]
        encoder: EncoderArgs,
        /// Shorten codes to this length (variable-length schemes)
        #[arg(long)]
        len: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Words to encode
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Move an entry to a shorter code, lengthening the entry holding it
    Shorten {
        /// Dictionary file
        dict_file: PathBuf,
        #[command(flatten)]
        encoder: EncoderArgs,
        /// Target code
        #[arg(long)]
        to: String,
        #[command(flatten)]
        entry: EntryArg,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Give tied weights distinct values and rewrite the file
    Normalize {
        /// Dictionary file
        dict_file: PathBuf,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// List supported input methods
    Schemes,
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());
    let settings = config_ops::load_settings(cli.config.as_deref());
    let mut prompt = Console::stdio(cli.yes);

    match cli.command {
        Command::Info { dict_file, json } => dict_ops::info(&dict_file, &settings, json),
        Command::Lookup {
            dict_file,
            code,
            prefix,
            json,
        } => dict_ops::lookup(&dict_file, &settings, &code, prefix, json),
        Command::Word {
            dict_file,
            word,
            json,
        } => dict_ops::word(&dict_file, &settings, &word, json),
        Command::Similar {
            dict_file,
            entry,
            json,
        } => dict_ops::similar(&dict_file, &settings, &entry.into(), json),
        Command::Add {
            dict_file,
            entry,
            save,
        } => dict_ops::add(&dict_file, &settings, &mut prompt, &entry.into(), &save.into()),
        Command::Remove {
            dict_file,
            entry,
            save,
        } => dict_ops::remove(&dict_file, &settings, &mut prompt, &entry.into(), &save.into()),
        Command::Modify {
            dict_file,
            entry,
            new_code,
            new_weight,
            save,
        } => dict_ops::modify(
            &dict_file,
            &settings,
            &mut prompt,
            &entry.into(),
            new_code.as_deref(),
            new_weight.as_deref(),
            &save.into(),
        ),
        Command::Encode {
            encoder,
            len,
            json,
            words,
        } => encode_ops::encode(
            &settings,
            encoder.scheme.as_deref(),
            &encoder.chars,
            &words,
            len,
            json,
        ),
        Command::Shorten {
            dict_file,
            encoder,
            to,
            entry,
            save,
        } => encode_ops::shorten(
            &dict_file,
            &settings,
            &mut prompt,
            encoder.scheme.as_deref(),
            &encoder.chars,
            &entry.into(),
            &to,
            &save.into(),
        ),
        Command::Normalize { dict_file, save } => {
            dict_ops::normalize(&dict_file, &settings, &mut prompt, &save.into())
        }
        Command::Schemes => config_ops::schemes(),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
