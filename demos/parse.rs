use anyhow::Context;
use gst::ast::PrettyPrinter;
use gst::parser::Parser;
use gst::tokenizer::Tokenizer;

fn main() -> anyhow::Result<()> {
    let args = std::env::args().skip(1);
    let mut json = false;
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(arg),
        }
    }
    let path = path.unwrap_or_else(|| "demos/sample.gst".to_string());

    let input = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let root = Parser::extended().parse_tree(&mut Tokenizer::new(&input));

    if json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        print!("{}", PrettyPrinter::new().with_source(&input).print(&root));
    }

    let diagnostics = root.all_diagnostics();
    if !diagnostics.is_empty() {
        eprintln!("{} diagnostic(s):", diagnostics.len());
        for diagnostic in diagnostics {
            eprintln!("  {diagnostic}");
        }
        anyhow::bail!("{path} is not a valid template");
    }
    Ok(())
}
