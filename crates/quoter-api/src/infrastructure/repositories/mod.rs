mod in_memory_market;

pub use in_memory_market::InMemoryMarketRepository;
