use crate::bitmap::RowOrder;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_clockwise_output_argument(command);
        let command = Self::register_counterclockwise_output_argument(command);
        let command = Self::register_blur_output_argument(command);
        Self::register_row_order_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_clockwise_output_argument(command: Command) -> Command {
        command.arg(Self::create_clockwise_output_argument())
    }

    fn register_counterclockwise_output_argument(command: Command) -> Command {
        command.arg(Self::create_counterclockwise_output_argument())
    }

    fn register_blur_output_argument(command: Command) -> Command {
        command.arg(Self::create_blur_output_argument())
    }

    fn register_row_order_argument(command: Command) -> Command {
        command.arg(Self::create_row_order_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to 24-bit BMP input file")
            .value_parser(value_parser!(PathBuf))
            .default_value("input.bmp")
    }

    fn create_clockwise_output_argument() -> Arg {
        arg!(clockwise_output: -c --clockwise_output <FILE> "Path for the clockwise rotated BMP")
            .default_value("output1.bmp")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_counterclockwise_output_argument() -> Arg {
        arg!(counterclockwise_output: -a --counterclockwise_output <FILE> "Path for the counterclockwise rotated BMP")
            .default_value("output2.bmp")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_blur_output_argument() -> Arg {
        arg!(blur_output: -g --blur_output <FILE> "Path for the blurred BMP")
            .default_value("output3.bmp")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_row_order_argument() -> Arg {
        arg!(row_order: -r --row_order <ORDER> "Row order of the input pixel array")
            .default_value("BottomUp")
            .value_parser(value_parser!(RowOrder))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            clockwise_output_file: Self::extract_path_argument(matches, "clockwise_output"),
            counterclockwise_output_file: Self::extract_path_argument(
                matches,
                "counterclockwise_output",
            ),
            blur_output_file: Self::extract_path_argument(matches, "blur_output"),
            row_order: Self::extract_row_order_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        Self::extract_path_argument(matches, "input_file")
    }

    fn extract_path_argument(matches: &ArgMatches, id: &str) -> PathBuf {
        matches
            .get_one::<PathBuf>(id)
            .unwrap_or_else(|| panic!("Argument {} has a default value, but was unset", id))
            .clone()
    }

    fn extract_row_order_argument(matches: &ArgMatches) -> RowOrder {
        matches
            .get_one::<RowOrder>("row_order")
            .expect("Row order must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
