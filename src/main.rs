use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use rtopo::desc::ConvertDesc;
use rtopo::error::TopoError;
use rtopo::topology::svg_to_topology;

const USAGE: &str = "\
usage: rtopo <input.svg> [output.json] [options]

Converts the <path> elements of an SVG document into a delta-encoded
topology. The output path defaults to the input path with a .json
extension.

options:
    --samples <n>           evaluations per curve segment (default 50)
    --no-mirror             keep the source y axis direction
    --no-compress           keep every sampled delta
    --keep-zero-deltas      keep [0, 0] offsets from duplicate points
    --object-name <name>    geometry collection name (default continents)
    --building-code <code>  buildingCode property value (default WKD)
    -h, --help              print this help
";

struct Args {
    input: PathBuf,
    output: PathBuf,
    desc: ConvertDesc,
}

fn parse_args(argv: &[String]) -> Result<Option<Args>, String> {
    let mut desc = ConvertDesc::default();
    let mut positional: Vec<PathBuf> = Vec::new();

    let mut it = argv.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--no-mirror" => desc.mirrored = false,
            "--no-compress" => desc.compression = false,
            "--keep-zero-deltas" => desc.drop_zero_deltas = false,
            "--samples" => {
                let v = it.next().ok_or("--samples needs a value")?;
                desc.samples = v
                    .parse()
                    .map_err(|_| format!("invalid --samples value '{v}'"))?;
            }
            "--object-name" => {
                desc.object_name = it.next().ok_or("--object-name needs a value")?.clone();
            }
            "--building-code" => {
                desc.building_code = it.next().ok_or("--building-code needs a value")?.clone();
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{other}'"));
            }
            other => positional.push(PathBuf::from(other)),
        }
    }

    let mut positional = positional.into_iter();
    let Some(input) = positional.next() else {
        return Err("missing input file".to_string());
    };
    let output = positional
        .next()
        .unwrap_or_else(|| input.with_extension("json"));
    if positional.next().is_some() {
        return Err("too many arguments".to_string());
    }

    Ok(Some(Args {
        input,
        output,
        desc,
    }))
}

fn run(args: &Args) -> Result<usize, TopoError> {
    let doc_text = fs::read_to_string(&args.input).map_err(|source| TopoError::ReadInput {
        path: args.input.clone(),
        source,
    })?;

    let topology = svg_to_topology(&doc_text, &args.desc)?;
    let n_arcs = topology.arcs.len();

    let json = serde_json::to_string_pretty(&topology)?;
    fs::write(&args.output, json).map_err(|source| TopoError::WriteOutput {
        path: args.output.clone(),
        source,
    })?;

    Ok(n_arcs)
}

fn main() -> ExitCode {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("error: {msg}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(n_arcs) => {
            println!(
                "wrote {} ({n_arcs} arcs from {})",
                args.output.display(),
                args.input.display(),
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
