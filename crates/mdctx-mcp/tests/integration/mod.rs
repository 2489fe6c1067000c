mod prompts;
mod read_file;
mod resources;
mod tools;
