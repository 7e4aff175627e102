pub mod autocomplete;

pub use autocomplete::AutocompleteProvider;
