use state_containers::{observer, ReadOnlySubject, Subject};
use std::sync::{Arc, Mutex};

#[test]
fn reads_initial_value() {
    let s = Subject::new(0);
    assert_eq!(0, s.value());
}

#[test]
fn set_replaces_value_and_notifies() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    s.set(1);

    assert_eq!(1, s.value());
    assert_eq!(vec![1], seen.lock().unwrap().clone());
}

#[test]
fn unsubscribed_observer_is_never_called_again() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    let o = s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    s.set(1);
    s.unsubscribe(&o);
    s.set(2);

    assert_eq!(2, s.value());
    assert_eq!(vec![1], seen.lock().unwrap().clone());
}

#[test]
fn every_assignment_notifies_even_when_value_is_unchanged() {
    let s = Subject::new(5);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    s.set(5);
    s.set(5);

    assert_eq!(vec![5, 5], seen.lock().unwrap().clone());
}

#[test]
fn observers_run_in_subscription_order() {
    let s: Subject<String> = Subject::new(String::from("🦀"));
    let record: Arc<Mutex<Vec<String>>> = Default::default();

    s.add_observer({
        let record = record.clone();
        move |val: &String| record.lock().unwrap().push(val.clone())
    });
    s.add_observer({
        let record = record.clone();
        move |_: &String| record.lock().unwrap().push(String::from("a"))
    });
    s.add_observer({
        let record = record.clone();
        move |_: &String| record.lock().unwrap().push(String::from("b"))
    });

    s.notify();
    s.notify();

    assert_eq!(
        vec![
            String::from("🦀"),
            String::from("a"),
            String::from("b"),
            String::from("🦀"),
            String::from("a"),
            String::from("b")
        ],
        record.lock().unwrap().clone()
    );
}

#[test]
fn subscribing_the_same_handle_twice_delivers_twice() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    let o = observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });
    s.subscribe(o.clone());
    s.subscribe(o.clone());

    s.set(1);
    assert_eq!(vec![1, 1], seen.lock().unwrap().clone());

    // one unsubscribe removes both entries
    s.unsubscribe(&o);
    s.set(2);
    assert_eq!(vec![1, 1], seen.lock().unwrap().clone());
}

#[test]
fn unsubscribing_an_unknown_observer_is_a_noop() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    let never_subscribed = observer(|_: &i32| {});
    s.unsubscribe(&never_subscribed);

    s.set(1);
    assert_eq!(vec![1], seen.lock().unwrap().clone());
}

#[test]
fn observer_added_during_a_round_waits_for_the_next_round() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<(char, i32)>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        let s = s.clone();
        move |val: &i32| {
            seen.lock().unwrap().push(('a', *val));
            if *val == 1 {
                s.subscribe(observer({
                    let seen = seen.clone();
                    move |val: &i32| seen.lock().unwrap().push(('b', *val))
                }));
            }
        }
    });

    s.set(1);
    assert_eq!(vec![('a', 1)], seen.lock().unwrap().clone());

    s.set(2);
    assert_eq!(
        vec![('a', 1), ('a', 2), ('b', 2)],
        seen.lock().unwrap().clone()
    );
}

#[test]
fn reentrant_assignment_runs_its_nested_round_first() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<String>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        let s = s.clone();
        move |val: &i32| {
            seen.lock().unwrap().push(format!("x:{val}"));
            if *val == 1 {
                s.set(2);
            }
        }
    });
    s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(format!("y:{val}"))
    });

    s.set(1);

    // the nested round for 2 completes before the outer round for 1 resumes
    assert_eq!(
        vec![
            String::from("x:1"),
            String::from("x:2"),
            String::from("y:2"),
            String::from("y:1")
        ],
        seen.lock().unwrap().clone()
    );
    assert_eq!(2, s.value());
}

#[test]
fn can_update() {
    let s = Subject::new(10);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    s.update(|n| n * 2);

    assert_eq!(20, s.value());
    assert_eq!(vec![20], seen.lock().unwrap().clone());
}

#[test]
fn can_update_inplace() {
    let s = Subject::new(vec![1, 2, 3]);

    s.update_inplace(|nums| {
        nums.push(4);
        nums.push(5);
        nums.push(6);
    });

    assert_eq!(vec![1, 2, 3, 4, 5, 6], s.value());
}

#[test]
fn can_clear_observers() {
    let s = Subject::new(0);
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    s.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    s.clear_observers();
    s.set(1);

    assert_eq!(1, s.value());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn initial_derived_values_must_not_be_default() {
    let s = Subject::new(10);
    let d = s.derive(|val| val + 5);

    assert_eq!(15, d.value());
}

#[test]
fn derived_subject_follows_its_parent() {
    let s = Subject::new(10);
    let d = s.derive(|val| val + 5);

    s.set(20);

    assert_eq!(25, d.value());
}

#[test]
fn read_only_view_mirrors_the_subject() {
    let s = Subject::new(0);
    let r = s.read_only();

    assert_eq!(s.value(), r.value());

    s.set(1);
    assert_eq!(1, r.value());
    assert_eq!(s.value(), r.value());
}

#[test]
fn observers_via_view_and_subject_share_one_ordered_stream() {
    let s = Subject::new(0);
    let r = s.read_only();
    let record: Arc<Mutex<Vec<String>>> = Default::default();

    s.add_observer({
        let record = record.clone();
        move |val: &i32| record.lock().unwrap().push(format!("direct:{val}"))
    });
    r.add_observer({
        let record = record.clone();
        move |val: &i32| record.lock().unwrap().push(format!("view:{val}"))
    });

    s.set(1);

    assert_eq!(
        vec![String::from("direct:1"), String::from("view:1")],
        record.lock().unwrap().clone()
    );
}

#[test]
fn observer_subscribed_through_view_unsubscribes_through_subject() {
    let s = Subject::new(0);
    let r = s.read_only();
    let seen: Arc<Mutex<Vec<i32>>> = Default::default();

    let o = r.add_observer({
        let seen = seen.clone();
        move |val: &i32| seen.lock().unwrap().push(*val)
    });

    s.set(1);
    s.unsubscribe(&o);
    s.set(2);

    assert_eq!(vec![1], seen.lock().unwrap().clone());
}

#[test]
fn each_read_only_call_yields_an_independent_view() {
    let s = Subject::new(0);
    let r1 = s.read_only();
    let r2 = s.read_only();

    s.set(7);

    assert_eq!(7, r1.value());
    assert_eq!(7, r2.value());
}

#[test]
fn views_convert_from_subjects() {
    let s = Subject::new(3);
    let from_ref = ReadOnlySubject::from(&s);
    let from_owned: ReadOnlySubject<i32> = s.clone().into();

    s.set(4);

    assert_eq!(4, from_ref.value());
    assert_eq!(4, from_owned.value());
}

#[test]
fn can_borrow_value_without_cloning() {
    let s = Subject::new(String::from("🦀"));
    let len: Arc<Mutex<usize>> = Default::default();

    s.with_value({
        let len = len.clone();
        move |val| *len.lock().unwrap() = val.len()
    });

    assert_eq!("🦀".len(), *len.lock().unwrap());
}

#[test]
fn debug_formats_current_value() {
    assert_eq!("Subject(10)", format!("{:?}", Subject::new(10)));
    assert_eq!(
        "ReadOnlySubject(10)",
        format!("{:?}", Subject::new(10).read_only())
    );
}
