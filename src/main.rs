use docopt::Docopt;
use eller_mazes::{
    generators::MazeEngine,
    grid::MazeGrid,
    renderers::{ImageRenderOptionsBuilder, ImageRenderer, TextRenderer},
    sinks::Tee,
    units::{ColumnsCount, RowsCount},
    MazeConfig,
};
use log::info;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    io::BufWriter,
    path::Path,
};

const USAGE: &str = "Eller mazes

Usage:
    eller_driver -h | --help
    eller_driver [--rows=<r>] [--columns=<c>] [--seed=<s>] [--no-text | --text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of rows in the maze [default: 10].
    --columns=<c>          Number of columns in the maze [default: 10].
    --seed=<s>             Seed for a reproducible maze. A random seed is used if not given.
    --no-text              Do not render the maze as text.
    --text-out=<path>      Output file path for a textual rendering of the maze, instead of the console.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one cell wall in a maze [default: 10] max 255.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_no_text: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::eller_mazes::errors::Error, ::eller_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut config = MazeConfig::new(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns));
    if let Some(seed) = args.flag_seed {
        config = config.with_seed(seed);
    }

    let engine = MazeEngine::from_config(&config)?;
    if let Some(seed) = engine.seed() {
        info!("Generating {} x {} maze with seed {}", config.rows.0, config.columns.0, seed);
    }

    let text_sink = if args.flag_no_text {
        None
    } else {
        Some(TextRenderer::new(text_output(&args.flag_text_out)?))
    };

    let image_sink = if !args.flag_image_out.is_empty() {
        let render_options = ImageRenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .output_file(Some(Path::new(&args.flag_image_out)))
            .build();
        Some(ImageRenderer::new(config.rows, config.columns, render_options)?)
    } else {
        None
    };

    // Edges can only be saved once the whole maze is known.
    let grid_sink = if !args.flag_save_edges.is_empty() {
        Some(MazeGrid::new())
    } else {
        None
    };

    let mut sinks = Tee::new(Tee::new(text_sink, image_sink), grid_sink);
    engine.run(&mut sinks)?;

    let (_, grid) = sinks.into_inner();
    if let Some(maze_grid) = grid {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    Ok(())
}

fn text_output(file_name: &str) -> Result<Box<dyn Write>> {
    if file_name.is_empty() {
        Ok(Box::new(io::stdout()))
    } else {
        let f = File::create(file_name)
            .chain_err(|| format!("Failed to create text output file {}", file_name))?;
        Ok(Box::new(BufWriter::new(f)))
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &MazeGrid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.passages_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (index_a, index_b) in maze_grid.iter_links() {
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("Maze graph written to {}", file_path);

    Ok(())
}
