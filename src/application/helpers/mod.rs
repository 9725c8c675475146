pub mod host_parsing;
