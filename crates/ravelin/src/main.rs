#![forbid(unsafe_code)]

//! Ravelin CLI: verify and decrypt SAML responses.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use ravelin_core::{algorithm, Error};
use ravelin_crypto::{PaddingMode, SignatureAlgorithm};
use ravelin_keys::{load_certificate_file, load_credential_files};
use ravelin_saml::{Context, Response, ResponsePipeline, SignatureProfile};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ravelin",
    about = "Ravelin: SAML response verification and decryption",
    version
)]
struct Cli {
    /// Log each verification stage to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify and decrypt a SAML response
    Verify {
        /// Response XML file
        file: PathBuf,

        /// Relying party certificate (PEM) the content key was wrapped to
        #[arg(long = "sp-cert")]
        sp_cert: PathBuf,

        /// Relying party private key (PEM, PKCS#8 or PKCS#1)
        #[arg(long = "sp-key")]
        sp_key: PathBuf,

        /// Trusted identity provider certificate (PEM or DER), repeatable
        #[arg(long = "idp-cert", required = true)]
        idp_cert: Vec<PathBuf>,

        /// Audience this relying party answers to
        #[arg(long)]
        audience: String,

        /// Expect RSA-SHA384 signatures instead of RSA-SHA256
        #[arg(long)]
        sha384: bool,

        /// What the signature covers: envelope or signed-info
        #[arg(long, default_value = "envelope")]
        profile: SignatureProfile,

        /// Require exact XML Encryption padding
        #[arg(long = "strict-padding")]
        strict_padding: bool,

        /// Evaluate conditions at this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Print the enveloped exclusive canonical form of a document
    Canonicalize {
        /// Input XML file
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List accepted algorithms
    Info,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Verify {
            file,
            sp_cert,
            sp_key,
            idp_cert,
            audience,
            sha384,
            profile,
            strict_padding,
            at,
        } => {
            let signature_algorithm = if sha384 {
                SignatureAlgorithm::RsaSha384
            } else {
                SignatureAlgorithm::RsaSha256
            };
            let padding = if strict_padding {
                PaddingMode::Strict
            } else {
                PaddingMode::Compatible
            };
            cmd_verify(VerifyArgs {
                file,
                sp_cert,
                sp_key,
                idp_cert,
                audience,
                signature_algorithm,
                profile,
                padding,
                at,
            })
        }

        Commands::Canonicalize { file, output } => cmd_canonicalize(file, output),

        Commands::Info => cmd_info(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct VerifyArgs {
    file: PathBuf,
    sp_cert: PathBuf,
    sp_key: PathBuf,
    idp_cert: Vec<PathBuf>,
    audience: String,
    signature_algorithm: SignatureAlgorithm,
    profile: SignatureProfile,
    padding: PaddingMode,
    at: Option<String>,
}

fn cmd_verify(args: VerifyArgs) -> Result<(), Error> {
    let xml = read_file(&args.file)?;
    let rp = load_credential_files(&args.sp_cert, &args.sp_key)?;

    let mut ctx = Context::new(args.audience, Vec::new())
        .with_signature_algorithm(args.signature_algorithm)
        .with_profile(args.profile)
        .with_padding(args.padding);
    for path in &args.idp_cert {
        let name = path.display().to_string();
        ctx = ctx.with_trusted(load_certificate_file(path)?.with_name(name));
    }

    let now = match args.at.as_deref() {
        Some(text) => parse_instant(text)?,
        None => Utc::now(),
    };

    tracing::debug!(file = %args.file.display(), trusted = ctx.trusted.len(), "Verifying response");
    let response = Response::from_xml(&xml)?;
    let assertion = ResponsePipeline::new(rp, ctx).process_at(&response, now)?;

    println!("NameID: {}", assertion.name_id_text);
    if let Some(issuer) = &assertion.issuer {
        println!("Issuer: {issuer}");
    }
    let mut attributes: Vec<_> = assertion.attributes.iter().collect();
    attributes.sort();
    for (name, value) in attributes {
        println!("{name}: {value}");
    }
    Ok(())
}

fn cmd_canonicalize(file: PathBuf, output: Option<PathBuf>) -> Result<(), Error> {
    let xml = read_file(&file)?;
    let canonical = ravelin_c14n::canonicalize_enveloped(&xml)?;
    write_output(output, &canonical)
}

fn cmd_info() -> Result<(), Error> {
    println!("Ravelin - SAML response verification");
    println!();
    println!("Key transport (RSA-OAEP):");
    println!("  {}", algorithm::RSA_OAEP);
    println!("  {}", algorithm::RSA_OAEP_ENC11);
    println!();
    println!("OAEP digests:");
    println!("  {}", algorithm::SHA1);
    println!("  {}", algorithm::SHA256);
    println!("  {}", algorithm::SHA256_DSIG);
    println!();
    println!("Mask generation (xmlenc11#rsa-oaep only):");
    println!("  {}", algorithm::MGF1_SHA1);
    println!("  {}", algorithm::MGF1_SHA256);
    println!();
    println!("Content encryption:");
    println!("  {}", algorithm::AES128_CBC);
    println!("  {}", algorithm::AES192_CBC);
    println!("  {}", algorithm::AES256_CBC);
    println!();
    println!("Signatures (chosen by configuration):");
    println!("  {}", algorithm::RSA_SHA256);
    println!("  {}  (--sha384)", algorithm::RSA_SHA384);
    println!();
    println!("Canonicalization:");
    println!("  {}", algorithm::EXC_C14N);
    println!("  {}", algorithm::EXC_C14N_WITH_COMMENTS);
    Ok(())
}

// ── Utility functions ────────────────────────────────────────────────

fn parse_instant(text: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("{text}: {e}")))
}

fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::Io(std::io::Error::new(e.kind(), format!("{}: {e}", path.display()))))
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(p) => std::fs::write(&p, data)
            .map_err(|e| Error::Io(std::io::Error::new(e.kind(), format!("{}: {e}", p.display())))),
        None => {
            use std::io::Write;
            std::io::stdout().write_all(data)?;
            Ok(())
        }
    }
}
