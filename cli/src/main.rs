use clap::{arg, command, Parser, Subcommand};
use crossterm::{
    cursor::{MoveLeft, MoveRight, MoveUp},
    execute,
    style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize},
};
use log::debug;
use spinners::Spinner;
use std::{
    io::{self, stdout},
    time::Instant,
};
use twophase::{
    constants::{DEFAULT_MAX_DEPTH, DEFAULT_PROBE_MAX, DEFAULT_PROBE_MIN},
    cubie::CubieCube,
    error::Error,
    facelet::{Color, FaceCube},
    scramble::{gen_scramble, random_state_scramble, scramble_from_str, scramble_to_str},
    Search, SolveOptions,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube using two-phase algorithm")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        max: usize,

        #[arg(long, default_value_t = DEFAULT_PROBE_MAX)]
        probe_max: u64,

        #[arg(long, default_value_t = DEFAULT_PROBE_MIN)]
        probe_min: u64,

        #[arg(short, long, help = "search for a shortest solution")]
        optimal: bool,

        #[arg(short, long, help = "print the moves generating the cube instead")]
        inverse: bool,

        #[arg(long, help = "mark the end of phase 1 with a dot")]
        separator: bool,

        #[arg(short, long, default_value_t = 0, help = "look for this many shorter solutions")]
        next: usize,

        #[arg(short, long)]
        verbose: bool,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        #[arg(short, long, help = "scramble to a uniformly random state")]
        random_state: bool,
        #[arg(short, long)]
        preview: bool,
    },
}

struct SolveArgs {
    max: usize,
    probe_max: u64,
    probe_min: u64,
    options: SolveOptions,
    next: usize,
    verbose: bool,
}

fn solve(scramble: &Option<String>, facelet: &Option<String>, args: &SolveArgs, preview: bool) -> Result<(), Error> {
    let fc = if let Some(scramble) = scramble {
        let scramble = scramble_from_str(scramble)?;
        FaceCube::from(&CubieCube::from(scramble.as_slice()))
    } else if let Some(facelet) = facelet {
        FaceCube::try_from(facelet.as_str())?
    } else {
        return Ok(());
    };
    if preview {
        print_facelet(&fc)?;
    }
    solve_state(&fc.to_string(), args)
}

fn solve_state(cubestring: &str, args: &SolveArgs) -> Result<(), Error> {
    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let mut search = Search::new();
    let result = search.solve_facelets(cubestring, args.max, args.probe_max, args.probe_min, args.options);
    spinner.stop_with_newline();
    let solution = result?;
    debug!("Solved after {} probes", search.probes());

    println!("Solution: {}", solution);
    println!("Move count: {}", solution.len());
    if args.verbose {
        println!("Probes: {}", search.probes());
    }
    for _ in 0..args.next {
        match search.next(args.probe_max, args.probe_min, args.options) {
            Ok(solution) => {
                println!("Solution: {}", solution);
                if args.verbose {
                    println!("Probes: {}", search.probes());
                }
            }
            Err(Error::NoSolution) | Err(Error::ProbeLimit) => break,
            Err(e) => return Err(e),
        }
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::DarkYellow,
        Color::R => TermColor::Magenta,
        Color::F => TermColor::Green,
        Color::D => TermColor::White,
        Color::L => TermColor::Red,
        Color::B => TermColor::Blue,
    }
}

fn print_face(face: &[Color], offset: u16) -> Result<(), io::Error> {
    for i in 0..3 {
        let layer = format!(
            "{}  {}  {}  {}",
            SetBackgroundColor(color_to_termcolor(face[3 * i])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 1])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 2])),
            SetBackgroundColor(TermColor::Reset)
        );

        println!("{layer}");

        if offset != 0 {
            execute!(stdout(), MoveRight(offset))?;
        }
    }

    Ok(())
}

fn print_facelet(facelet: &FaceCube) -> Result<(), io::Error> {
    let stdout = stdout();

    println!();
    execute!(&stdout, MoveRight(6))?;
    print_face(&facelet.f[0..9], 6)?; // U
    execute!(&stdout, MoveLeft(6))?;
    print_face(&facelet.f[36..45], 0)?; // L
    execute!(&stdout, MoveRight(6), MoveUp(3))?;
    print_face(&facelet.f[18..27], 6)?; // F
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(12))?;
    print_face(&facelet.f[9..18], 12)?; // R
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(18))?;
    print_face(&facelet.f[45..54], 18)?; // B
    execute!(&stdout, MoveLeft(12))?;
    print_face(&facelet.f[27..36], 6)?; // D
    execute!(&stdout, MoveLeft(12))?;
    println!();

    Ok(())
}

fn scramble(length: usize, random_state: bool, preview: bool) -> Result<(), Error> {
    let ss = if random_state {
        random_state_scramble(DEFAULT_MAX_DEPTH, DEFAULT_PROBE_MAX)?
    } else {
        gen_scramble(length)
    };
    let cc = CubieCube::default().apply_moves(&ss);
    println!("Scramble: {}", scramble_to_str(&ss));
    println!("Facelets: {}", FaceCube::from(&cc));
    if preview {
        print_facelet(&FaceCube::from(&cc))?;
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            max,
            probe_max,
            probe_min,
            optimal,
            inverse,
            separator,
            next,
            verbose,
            preview,
        }) => {
            let mut options = SolveOptions::APPEND_LENGTH;
            if *optimal {
                options |= SolveOptions::OPTIMAL_SOLUTION;
            }
            if *inverse {
                options |= SolveOptions::INVERSE_SOLUTION;
            }
            if *separator {
                options |= SolveOptions::USE_SEPARATOR;
            }
            let args = SolveArgs {
                max: *max,
                probe_max: *probe_max,
                probe_min: *probe_min,
                options,
                next: *next,
                verbose: *verbose,
            };
            solve(scramble, facelet, &args, *preview)
        }
        Some(Commands::Scramble {
            length,
            random_state,
            preview,
        }) => scramble(*length, *random_state, *preview),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
