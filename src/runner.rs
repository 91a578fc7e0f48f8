// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 The seqfetch authors

use std::{
    fmt,
    fs::File,
    io::{stdout, BufWriter, Write},
    path::PathBuf,
};

use log::{info, warn};

use clap::{Parser, Subcommand, ValueEnum};

use crate::batch::retriever::{BatchRetriever, DEFAULT_PAGE_SIZE};
use crate::config::{load_config, ConfigOverrides};
use crate::entrez::{
    client::EntrezClient,
    format::RecordFormat,
    search::{IdType, SearchRequest, DEFAULT_RETMAX},
};
use crate::errors::SeqfetchError;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Contact email sent to NCBI with every request (or $NCBI_EMAIL)
    #[arg(short, long, global = true)]
    email: Option<String>,

    /// NCBI API key (or $NCBI_API_KEY)
    #[arg(short = 'k', long = "api-key", global = true)]
    api_key: Option<String>,

    /// Configuration file (default: ~/.seqfetchconfig, then ./.seqfetchconfig)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// E-utilities base URL (mostly used for testing)
    #[arg(long = "base-url", global = true)]
    base_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List databases, or describe one
    Info {
        /// Database to describe
        #[arg(short, long)]
        db: Option<String>,
    },

    /// Search a database and print the matching ids
    Search {
        /// Database
        #[arg(short, long, default_value = "nucleotide")]
        db: String,

        /// Entrez query, e.g. "Human[Orgn] AND BRCA1[Gene]"
        term: String,

        /// Maximum number of ids to list
        #[arg(short, long, default_value_t = DEFAULT_RETMAX)]
        retmax: usize,

        /// Kind of id to list
        #[arg(short, long = "id-type", default_value_t = IdTypeArg::Acc)]
        id_type: IdTypeArg,

        /// Also print the history session (WebEnv, query key)
        #[arg(long)]
        history: bool,
    },

    /// Fetch records by id
    Fetch {
        /// Database
        #[arg(short, long, default_value = "nucleotide")]
        db: String,

        /// Record format
        #[arg(short, long, default_value_t = FormatArg::Fasta,
            help = "Record format [fasta|genbank|gbwithparts|acc|xml] (or just f|g); default: fasta",
            hide_default_value = true,
            hide_possible_values = true,
        )]
        format: FormatArg,

        /// Output file (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record ids (accessions or uids)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Search, then download all matching records page by page into a file
    Batch {
        /// Database
        #[arg(short, long, default_value = "nucleotide")]
        db: String,

        /// Entrez query
        term: String,

        /// Records per request
        #[arg(short, long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Download at most this many records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Record format
        #[arg(short, long, default_value_t = FormatArg::Fasta,
            help = "Record format [fasta|genbank|gbwithparts|acc|xml] (or just f|g); default: fasta",
            hide_default_value = true,
            hide_possible_values = true,
        )]
        format: FormatArg,

        /// Kind of id the session is built on
        #[arg(short, long = "id-type", default_value_t = IdTypeArg::Acc)]
        id_type: IdTypeArg,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    #[clap(name = "fasta")]
    #[clap(alias = "f")]
    Fasta,
    #[clap(name = "genbank")]
    #[clap(alias = "g", alias = "gb")]
    GenBank,
    #[clap(name = "gbwithparts")]
    GenBankWithParts,
    #[clap(name = "acc")]
    Accession,
    #[clap(name = "xml")]
    Xml,
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormatArg::Fasta => "fasta",
            FormatArg::GenBank => "genbank",
            FormatArg::GenBankWithParts => "gbwithparts",
            FormatArg::Accession => "acc",
            FormatArg::Xml => "xml",
        };
        write!(f, "{}", s)
    }
}

impl From<FormatArg> for RecordFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fasta => RecordFormat::Fasta,
            FormatArg::GenBank => RecordFormat::GenBank,
            FormatArg::GenBankWithParts => RecordFormat::GenBankWithParts,
            FormatArg::Accession => RecordFormat::Accession,
            FormatArg::Xml => RecordFormat::NativeXml,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum IdTypeArg {
    Acc,
    Uid,
}

impl fmt::Display for IdTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IdTypeArg::Acc => "acc",
            IdTypeArg::Uid => "uid",
        };
        write!(f, "{}", s)
    }
}

impl From<IdTypeArg> for IdType {
    fn from(arg: IdTypeArg) -> Self {
        match arg {
            IdTypeArg::Acc => IdType::Accession,
            IdTypeArg::Uid => IdType::Uid,
        }
    }
}

fn write_output(output: Option<&PathBuf>, payload: &[u8]) -> Result<(), SeqfetchError> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path).map_err(SeqfetchError::Sink)?);
            writer.write_all(payload).map_err(SeqfetchError::Sink)?;
            writer.flush().map_err(SeqfetchError::Sink)
        }
        None => {
            let mut out = stdout().lock();
            out.write_all(payload)?;
            out.flush()?;
            Ok(())
        }
    }
}

pub fn run() -> Result<(), SeqfetchError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        email: cli.email,
        api_key: cli.api_key,
        base_url: cli.base_url,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;
    if config.email.is_none() {
        warn!("No contact email configured; NCBI may throttle or block anonymous clients.");
    }
    let client = EntrezClient::new(config)?;

    match cli.command {
        Command::Info { db } => {
            let json = client.einfo(db.as_deref())?;
            println!("{}", json);
        }
        Command::Search {
            db,
            term,
            retmax,
            id_type,
            history,
        } => {
            let mut request = SearchRequest::new(db, term)
                .retmax(retmax)
                .id_type(id_type.into());
            if history {
                request = request.with_history();
            }
            let result = client.esearch(&request)?;
            println!(
                "{} record(s) found, showing {} from {}",
                result.count,
                result.id_list.len(),
                result.ret_start + 1
            );
            for id in &result.id_list {
                println!("{}", id);
            }
            if let Some(session) = &result.session {
                println!("WebEnv: {}", session.web_env());
                println!("QueryKey: {}", session.query_key());
            }
        }
        Command::Fetch {
            db,
            format,
            output,
            ids,
        } => {
            let payload = client.efetch_ids(&db, &ids, format.into())?;
            write_output(output.as_ref(), &payload)?;
        }
        Command::Batch {
            db,
            term,
            page_size,
            limit,
            format,
            id_type,
            output,
        } => {
            // Validate before talking to the server.
            let retriever = BatchRetriever::new(page_size, format.into())?;
            // Only the count and the history session are needed, not the id list.
            let request = SearchRequest::new(db.as_str(), term)
                .retmax(0)
                .with_history()
                .id_type(id_type.into());
            let result = client.esearch(&request)?;
            let session = result.session.clone().ok_or_else(|| {
                SeqfetchError::Format(String::from("Search returned no history session"))
            })?;
            let count = result.records_to_fetch(limit);
            info!("{} record(s) found, downloading {}", result.count, count);

            let mut pager = client.pager(&db, id_type.into());
            let summary = retriever.retrieve_to_path(&mut pager, &session, count, &output)?;
            println!(
                "Downloaded {} record(s) in {} request(s) to {}",
                summary.records,
                summary.pages,
                output.display()
            );
        }
    }

    Ok(())
}
