pub fn print_reply(reply: &str) {
    println!("{}", reply.trim_end());
}
