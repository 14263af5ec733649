mod basic;
mod history;
mod poll;
mod support;
