pub(crate) struct CliArgs {
    pub cmd: String,
    pub verbose: bool,
    pub json_out: bool,
    pub positional: Vec<String>,
}

pub(crate) fn usage() -> &'static str {
    "Usage: corvid <entries|glob|walk|methods> [json] [verbose] <args>"
}

pub(crate) fn parse_args() -> Result<CliArgs, String> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();
    let cmd = argv.first().cloned().ok_or_else(|| usage().to_string())?;
    argv.remove(0);

    let mut verbose = false;
    let mut json_out = false;
    let mut positional: Vec<String> = Vec::new();

    for a in argv {
        if a.starts_with("--") {
            return Err(format!("Unknown option: {a}"));
        }
        match a.as_str() {
            "verbose" => verbose = true,
            "json" => json_out = true,
            _ => positional.push(a),
        }
    }

    Ok(CliArgs {
        cmd,
        verbose,
        json_out,
        positional,
    })
}
