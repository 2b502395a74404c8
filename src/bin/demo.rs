use chained_hashmap::ChainedHashMap;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut map = ChainedHashMap::new();
    map.set("Jesus", "Developer");
    println!("{}", map.has("Jesus"));
    map.remove("Jesus");
    println!("{}", map.has("Jesus"));
}
