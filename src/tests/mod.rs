mod parse;
mod slug;
