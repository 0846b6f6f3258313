
mod thumbnail;
