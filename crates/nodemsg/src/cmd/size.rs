use nodemsg_header::MessageHeader;

use crate::cmd::SizeArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_size, OutputFormat, SizeOutput};

pub fn run(args: SizeArgs, format: OutputFormat) -> CliResult<i32> {
    let header = MessageHeader {
        source_node_id: args.source.then_some(0),
        destination_node_id: args.destination.then_some(0),
        ..MessageHeader::default()
    };
    print_size(&SizeOutput::new(&header), format);
    Ok(SUCCESS)
}
