use pretty_assertions::assert_eq;
use testflow::{Dispatcher, ResultRecord, RunOptions, menu::MenuBuilder, test::CaseFnHandle};

use crate::{catalog, id};

#[test]
fn text_menu_of_the_catalog() {
    let dispatcher = Dispatcher::new(catalog());
    assert_eq!(
        dispatcher.menu("text").unwrap(),
        concat!(
            "-group Lib.tests.cases\n",
            "-case Lib.tests.cases.FooTest\n",
            "-group Lib.tests.cases.net\n",
            "-case Lib.tests.cases.net.HttpTest\n",
            "-case Lib.tests.cases.net.SocketTest\n",
            "-group Other.tests.cases\n",
            "-case Other.tests.cases.EmptyTest\n",
        )
    );
}

#[test]
fn html_menu_of_the_catalog() {
    let html = MenuBuilder::new().menu(&catalog(), "html").unwrap();
    let first = r#"<ul><li><a href="?group=Lib.tests.cases">Lib</a><ul>"#;
    let http = r#"<li><a href="?case=Lib.tests.cases.net.HttpTest">HttpTest</a></li>"#;
    let last = r#"<li><a href="?case=Other.tests.cases.EmptyTest">EmptyTest</a></li>"#;
    assert!(html.starts_with(first));
    assert!(html.contains(http));
    assert!(html.ends_with(&format!("{last}</ul></li></ul>")));
}

#[test]
fn menu_order_is_independent_of_discovery() {
    let forward = [id("b.tests.cases.X"), id("a.tests.cases.Y")];
    let backward = [id("a.tests.cases.Y"), id("b.tests.cases.X")];
    let builder = MenuBuilder::new();
    assert_eq!(
        builder.build(&forward, "html"),
        builder.build(&backward, "html")
    );
}

#[test]
fn every_menu_line_is_a_selection() {
    let catalog = catalog()
        .with_case(
            id("Lib.Loose"),
            CaseFnHandle::from_shared(|| ResultRecord::pass()),
        )
        .with_case(id("Lib.tests.Helper"), CaseFnHandle::from_shared(|| ()));
    let mut dispatcher = Dispatcher::new(catalog);

    let menu = dispatcher.menu("text").unwrap();
    assert!(menu.contains("-case Lib.Loose\n"));
    assert!(menu.contains("-group Lib.tests\n-case Lib.tests.Helper\n"));

    for line in menu.lines() {
        let (options, selection) = match line.split_once(' ') {
            Some(("-case", case)) => (RunOptions::new().with_case(id(case)), case),
            Some(("-group", group)) => (RunOptions::new().with_group(id(group)), group),
            _ => panic!("unexpected menu line {line:?}"),
        };
        let report = dispatcher.run(None, options).unwrap();
        let title = report.map(|report| report.title);
        assert_eq!(title.as_deref(), Some(selection), "{line}");
    }
}

#[test]
fn unknown_format() {
    assert_eq!(Dispatcher::new(catalog()).menu("pdf"), None);
}
