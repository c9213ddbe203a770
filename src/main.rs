use plum_board::command::command_loop::run_stdio_loop;
use plum_board::logging::init_logging;

fn main() -> std::io::Result<()> {
    init_logging();
    run_stdio_loop()
}
