use clap::{ArgAction, Args, Parser};
use env_logger::Env;
use log::info;
use nessie::{pipeline::run, prelude::*};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

/// Pattern search and complexity measures over FASTA records.
#[derive(Parser, Debug)]
#[command(name = "nessie", version, about)]
struct Cli {
    /// Input FASTA or multi-FASTA file
    #[arg(short = 'I', long, value_name = "FILEPATH")]
    input: PathBuf,

    /// Output file
    #[arg(short = 'O', long, value_name = "FILEPATH")]
    output: PathBuf,

    #[command(flatten)]
    mode: ModeArgs,

    /// First position of the interval to analyse
    #[arg(short = 'b', long, default_value_t = 0)]
    begin: usize,

    /// Last position of the interval to analyse [default: end of each record]
    #[arg(short = 'e', long)]
    end: Option<usize>,

    /// Print counts only
    #[arg(short = 'c', long = "counts", conflicts_with = "indexes_only")]
    counts_only: bool,

    /// Print indexes only
    #[arg(short = 'i', long = "indexes")]
    indexes_only: bool,

    /// Analyse the reverse complement
    #[arg(short = 'C', long)]
    complement: bool,

    /// Minimum k-mer length
    #[arg(short = 'k', long = "kmin")]
    k_min: Option<usize>,

    /// Maximum k-mer length [default: kmin]
    #[arg(short = 'K', long = "kmax")]
    k_max: Option<usize>,

    /// Allowed mismatches, as a percentage of the k-mer length
    #[arg(short = 'm', long, default_value_t = 0)]
    mismatch: usize,

    /// Allowed gaps, as a percentage of the k-mer length
    #[arg(short = 'g', long, default_value_t = 0)]
    gap: usize,

    /// Allowed mismatches and gaps combined, as a percentage of the k-mer
    /// length
    #[arg(short = 't', long, default_value_t = 0)]
    total: usize,

    /// Allowed minority purines or pyrimidines in a triplex, as a percentage
    /// of the k-mer length
    #[arg(short = 'p', long, default_value_t = 0)]
    purine: usize,

    /// Report only the longest non-overlapping patterns between kmin and kmax
    #[arg(long = "max")]
    longest: bool,

    /// Sliding interval length for entropy and linguistic complexity
    #[arg(short = 'l', long)]
    interval: Option<usize>,

    /// Sliding interval shift
    #[arg(short = 's', long)]
    shift: Option<usize>,

    /// File collecting per-record errors
    #[arg(long, value_name = "FILEPATH", default_value = "logfile.txt")]
    log: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ModeArgs {
    /// Search palindromes
    #[arg(short = 'P', long)]
    palindrome: bool,

    /// Search mirror repeats
    #[arg(short = 'M', long)]
    mirror: bool,

    /// Search the motifs of a FASTA file
    #[arg(short = 'N', long, value_name = "FILEPATH")]
    motif: Option<PathBuf>,

    /// Shannon entropy
    #[arg(short = 'E', long)]
    entropy: bool,

    /// Linguistic complexity
    #[arg(short = 'L', long)]
    linguistic: bool,

    /// Search triplex-forming mirror repeats
    #[arg(short = 'T', long)]
    triplex: bool,

    /// List every k-mer
    #[arg(short = 'A', long)]
    allkmer: bool,
}

impl ModeArgs {
    fn mode(&self) -> Mode {
        if self.palindrome {
            Mode::Kmer(KmerSearch::Palindrome)
        } else if self.mirror {
            Mode::Kmer(KmerSearch::Mirror)
        } else if self.triplex {
            Mode::Kmer(KmerSearch::Triplex)
        } else if self.allkmer {
            Mode::Kmer(KmerSearch::AllKmer)
        } else if self.entropy {
            Mode::Entropy
        } else if self.linguistic {
            Mode::Linguistic
        } else {
            Mode::Motif
        }
    }
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            mode:        self.mode.mode(),
            begin:       self.begin,
            end:         self.end,
            counts:      !self.indexes_only,
            indexes:     !self.counts_only,
            k_min:       self.k_min,
            k_max:       self.k_max,
            tolerance:   Tolerance {
                mismatch: self.mismatch,
                gap:      self.gap,
                total:    self.total,
                purine:   self.purine,
            },
            longest:     self.longest,
            interval:    self.interval,
            shift:       self.shift,
            orientation: Orientation::from_complement_flag(self.complement),
        }
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level(cli.verbose))).init();

    let config = cli.run_config();
    config.validate().unwrap_or_die("invalid arguments");

    let motifs = match &cli.mode.motif {
        Some(path) => FastaReader::from_filename(path)
            .unwrap_or_fail()
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_fail(),
        None => Vec::new(),
    };

    let records = FastaReader::from_filename(&cli.input).unwrap_or_fail();
    let mut out = BufWriter::new(File::create(&cli.output).unwrap_or_die("cannot create the output file"));
    let mut failures = BufWriter::new(File::create(&cli.log).unwrap_or_die("cannot create the log file"));

    let mut command = String::from("#Command");
    for arg in std::env::args().skip(1) {
        command.push(' ');
        command.push_str(&arg);
    }
    writeln!(out, "{command}").unwrap_or_fail();

    let summary = run(records, &mut out, &mut failures, &config, &motifs).unwrap_or_fail();
    out.flush().unwrap_or_fail();
    failures.flush().unwrap_or_fail();

    info!(
        "{} records processed, {} failed (see {})",
        summary.processed,
        summary.failed,
        cli.log.display()
    );
}
