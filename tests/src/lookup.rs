mod hint;
mod integration;
