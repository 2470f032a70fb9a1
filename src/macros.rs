/// Compile a literal regex once and return a `&'static Regex`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a line from `root()` by appending `name => value` pairs through a
/// [`ParameterClassifier`](crate::ParameterClassifier), left to right.
///
/// Evaluates to `Result<NodeRef>`; the last pair becomes the head.
///
/// ```
/// use linekey::{ParameterClassifier, chain};
///
/// let classifier = ParameterClassifier::standard();
/// let line = chain!(classifier; "Type" => "Foo", "Key" => "hello").unwrap();
/// assert_eq!(line.to_string(), "Type:Foo:Key:hello");
/// ```
#[macro_export]
macro_rules! chain {
    ($classifier:expr; $($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_variables)]
        let classifier: &$crate::ParameterClassifier = &$classifier;
        let build = || -> $crate::Result<$crate::NodeRef> {
            #[allow(unused_mut)]
            let mut line = $crate::ParameterNode::root();
            $( line = classifier.append(Some(&line), $name, $value)?; )*
            Ok(line)
        };
        build()
    }};
}
