use clap::Args;
use mailauth_api::AppState;
use mailauth_domain::{
    DkimValue, DomainReport, GeneratedRecord, RecordAction, Session, SessionError, SessionPhase,
    SpfStatus,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Domain to check
    pub domain: String,

    /// Complete DKIM record to publish (v=DKIM1; k=rsa; p=...)
    #[arg(long, conflicts_with = "dkim_key")]
    pub dkim_value: Option<String>,

    /// Bare DKIM public key; wrapped as v=DKIM1; k=rsa; p=<key>
    #[arg(long)]
    pub dkim_key: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    phase: SessionPhase,
    report: Option<&'a DomainReport>,
    records: Vec<&'a GeneratedRecord>,
    note: Option<String>,
}

/// check → DKIM (given or looked up) → generate, then print.
pub async fn run_check(state: &AppState, selector: &str, args: CheckArgs) -> anyhow::Result<()> {
    let report = state.check_domain.execute(&args.domain).await?;
    let session = Session::new().check(report);

    let (dkim, source) = match (args.dkim_value, args.dkim_key) {
        (Some(value), _) => (Some(DkimValue::record(value)), DkimSource::Flag("--dkim-value")),
        (None, Some(key)) => (Some(DkimValue::public_key(key)), DkimSource::Flag("--dkim-key")),
        (None, None) => (lookup_dkim(state, &session, selector).await, DkimSource::Lookup),
    };

    let session = match dkim {
        Some(dkim) => session.set_dkim(dkim)?,
        None => session,
    };

    let (session, note) = match state.generate_records.advance(&session) {
        Ok(generated) => (generated, None),
        Err(e @ (SessionError::MissingDkimValue | SessionError::GenerationSuppressed)) => {
            let note = match e {
                SessionError::MissingDkimValue => missing_dkim_note(source, selector),
                _ => e.to_string(),
            };
            (session, Some(note))
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        domain = session.domain().unwrap_or_default(),
        phase = ?session.phase(),
        "Check finished"
    );

    if args.json {
        let output = CheckOutput {
            phase: session.phase(),
            report: session.report(),
            records: session
                .records()
                .map(|set| set.records().collect())
                .unwrap_or_default(),
            note,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(&session, note.as_deref());
    }

    Ok(())
}

/// Where the DKIM value for generation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DkimSource {
    Flag(&'static str),
    Lookup,
}

fn missing_dkim_note(source: DkimSource, selector: &str) -> String {
    match source {
        DkimSource::Flag(flag) => format!("{flag} is blank; pass the DKIM record or public key"),
        DkimSource::Lookup => format!(
            "No DKIM record found at {selector}._domainkey; pass --dkim-value or --dkim-key"
        ),
    }
}

async fn lookup_dkim(state: &AppState, session: &Session, selector: &str) -> Option<DkimValue> {
    let domain = session.domain()?;
    match state.lookup_dkim.execute(domain, selector).await {
        Ok(records) => records.into_iter().next().map(DkimValue::record),
        Err(e) => {
            debug!(error = %e, "No DKIM record to reuse");
            None
        }
    }
}

fn print_human(session: &Session, note: Option<&str>) {
    let Some(report) = session.report() else {
        return;
    };

    println!("Domain: {}", report.domain);
    println!("  SPF:   {}", spf_label(report.status.spf));
    println!("  DMARC: {}", presence(report.status.dmarc_present));
    println!("  MX:    {}", presence(report.status.mx_present));

    if let Some(record) = &report.spf_record {
        println!("\nCurrent SPF record:\n  {}", record);
    }
    if !report.other_txt.is_empty() {
        println!("\nOther TXT records:");
        for record in &report.other_txt {
            println!("  {}", record);
        }
    }
    if let Some(dmarc) = report.records.dmarc.first() {
        println!("\nCurrent DMARC record:\n  {}", dmarc);
    }

    if let Some(records) = session.records() {
        println!("\nRecords to publish:");
        for record in records.records() {
            println!(
                "  [{}] {} {}\n      {}",
                action_label(record.action),
                record.record_type,
                record.host,
                record.value
            );
        }
    }

    if let Some(note) = note {
        println!("\n{}", note);
    }
}

fn spf_label(status: SpfStatus) -> &'static str {
    match status {
        SpfStatus::Absent => "missing",
        SpfStatus::PresentWithoutAuthorization => "present, mail service not authorized",
        SpfStatus::PresentWithAuthorization => "present, mail service authorized",
    }
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "missing"
    }
}

fn action_label(action: RecordAction) -> &'static str {
    match action {
        RecordAction::None => "ok",
        RecordAction::Update => "update",
        RecordAction::Create => "create",
    }
}
