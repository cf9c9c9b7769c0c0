use std::error;
use std::io;

use clap::{Arg, Command};

use reducheck::catalogue;
use reducheck::report::{Level, Log};

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let mut cmd = Command::new("reducheck")
        .about("Checks a reducible configuration for dangerous cut patterns after contraction")
        .disable_help_flag(true)
        .arg(Arg::new("conf")
             .takes_value(true)
             .short('c')
             .long("conf")
             .help("A configuration file"))
        .arg(Arg::new("edgeids")
             .takes_value(true)
             .multiple_values(true)
             .short('e')
             .long("edgeids")
             .help("A list of contraction edge ids (in dual form)"))
        .arg(Arg::new("verbosity")
             .takes_value(true)
             .default_value("0")
             .short('v')
             .long("verbosity")
             .help("1 for debug, 2 for trace"))
        .arg(Arg::new("help")
             .short('H')
             .long("help")
             .help("Display options"));
    let m = cmd.clone().get_matches();

    if m.is_present("help") {
        cmd.print_help()?;
        println!();
        return Ok(());
    }

    let verbosity: u8 = m.value_of("verbosity").expect("verbosity has a default").parse()?;
    let level = Level::from_verbosity(verbosity);

    if let (Some(conf), Some(edgeids)) = (m.value_of("conf"), m.values_of("edgeids")) {
        let edgeids = edgeids
            .map(|id| id.parse::<usize>())
            .collect::<Result<Vec<usize>, _>>()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut log = Log::new(&mut out, level);
        catalogue::check(conf, &edgeids, &mut log)?;
    }

    Ok(())
}
