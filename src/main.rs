use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, ValueHint};
use eframe::egui;
use log::LevelFilter;

use plothelper::data::nearest::find_nearest_index;
use plothelper::data::number_format::scinote;
use plothelper::{makefig_from_tag, FigureStyle, LayoutDescriptor, LayoutView};

/// Window showing one layout.
struct PreviewApp {
    layout: LayoutDescriptor,
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            LayoutView::new(&self.layout).show(ui);
        });
    }
}

fn cli() -> Command {
    Command::new("plothelper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a pre-configured figure layout, plot demo data, and preview or export it")
        .arg(
            Arg::new("panels")
                .short('p')
                .long("panels")
                .default_value("1")
                .help("Panel arrangement: 1, 2h or 2v"),
        )
        .arg(
            Arg::new("ratio")
                .short('r')
                .long("ratio")
                .default_value("2")
                .value_parser(clap::value_parser!(f64))
                .help("Top:bottom height ratio for the 2v arrangement"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .default_value("8")
                .value_parser(clap::value_parser!(f64))
                .help("Figure width in inches"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .default_value("6")
                .value_parser(clap::value_parser!(f64))
                .help("Figure height in inches"),
        )
        .arg(
            Arg::new("style")
                .short('s')
                .long("style")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .help("Style file (.yaml, .yml or .json); defaults are used when omitted"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .help("Write the figure to this .svg/.png/.jpg file instead of opening a window"),
        )
}

/// Gaussian on the first panel; its derivative on the second, if any.
fn plot_demo(layout: &mut LayoutDescriptor) -> plothelper::Result<()> {
    let x: Vec<f64> = (0..2048).map(|i| i as f64 / 2048. * 590. + 10.).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|x| (-(x - 300.0).powi(2) / 1200.0).exp() * 0.06)
        .collect();

    layout.plot(0, &x, &y)?.label = Some("gaussian".to_string());
    layout.set_ylabel(0, "signal")?;

    let peak = find_nearest_index(&x, 300.0)?;
    log::info!(
        "sample nearest to x=300 is x={} with y={}",
        scinote(x[peak], 3)?,
        scinote(y[peak], 3)?
    );

    if layout.len() > 1 {
        let dy: Vec<f64> = x.iter().zip(&y).map(|(x, y)| -(x - 300.0) / 600.0 * y).collect();
        layout.plot(1, &x, &dy)?.label = Some("derivative".to_string());
    }
    let last = layout.len() - 1;
    layout.set_xlabel(last, "x")?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let style = match matches.get_one::<PathBuf>("style") {
        Some(path) => FigureStyle::load(path)?,
        None => FigureStyle::default(),
    };
    let panels = matches
        .get_one::<String>("panels")
        .map(String::as_str)
        .unwrap_or("1");
    let ratio = matches.get_one::<f64>("ratio").copied().unwrap_or(2.0);
    let width = matches.get_one::<f64>("width").copied().unwrap_or(8.0);
    let height = matches.get_one::<f64>("height").copied().unwrap_or(6.0);

    let mut layout = makefig_from_tag(panels, ratio, width, height, &style)?;
    plot_demo(&mut layout)?;

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        layout.save(output)?;
        return Ok(());
    }

    let (w, h) = layout.container().pixel_size();
    let mut opts = eframe::NativeOptions::default();
    opts.viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(w as f32, h as f32));
    eframe::run_native(
        "plothelper",
        opts,
        Box::new(|_cc| Ok(Box::new(PreviewApp { layout }))),
    )?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("PLOTHELPER_LOG", "warn,plothelper=info"))
        .init();

    let matches = cli().get_matches();
    run(&matches)
}
