use super::predicate::Object;

pub fn build_arg_string(args: &[Object]) -> String {
    let first = args.iter().take(1).fold(String::new(), |acc, item| acc + &**item);
    args.iter().skip(1).fold(first, |acc, item| acc + ", " + &**item)
}
