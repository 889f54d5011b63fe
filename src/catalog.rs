use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{QuizError, Result};
use crate::types::{Difficulty, Question};

struct QuestionSeed {
    id: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
    correct: usize,
    explanation: &'static str,
    difficulty: Difficulty,
    unit: &'static str,
    topic: &'static str,
}

use crate::types::Difficulty::{Easy, Hard, Medium};

// Unit I: Multithreading & Exception Handling
const UNIT_I: [QuestionSeed; 16] = [
    QuestionSeed {
        id: "q1",
        prompt: "Which method is used to start a thread in Java?",
        options: &["run()", "start()", "execute()", "begin()"],
        correct: 1,
        explanation: "The start() method is used to begin thread execution. It creates a new thread and calls the run() method in that new thread context.",
        difficulty: Easy,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q2",
        prompt: "What is the difference between extending Thread class and implementing Runnable interface?",
        options: &[
            "No difference, both are identical",
            "Extending Thread allows multiple inheritance, Runnable does not",
            "Implementing Runnable allows multiple inheritance, extending Thread does not",
            "Extending Thread is faster than implementing Runnable",
        ],
        correct: 2,
        explanation: "Implementing Runnable interface is preferred because Java supports single inheritance. A class can implement multiple interfaces but can extend only one class.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q3",
        prompt: "Which thread state indicates that a thread is waiting for a monitor lock?",
        options: &["WAITING", "BLOCKED", "TIMED_WAITING", "RUNNABLE"],
        correct: 1,
        explanation: "BLOCKED state indicates that a thread is waiting to acquire a monitor lock to enter or re-enter a synchronized block/method.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q4",
        prompt: "What happens when Thread.sleep() is called?",
        options: &[
            "Thread terminates permanently",
            "Thread enters TIMED_WAITING state",
            "Thread enters BLOCKED state",
            "Thread continues execution",
        ],
        correct: 1,
        explanation: "Thread.sleep() causes the current thread to enter TIMED_WAITING state for the specified duration.",
        difficulty: Easy,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q5",
        prompt: "Which keyword is used to handle exceptions in Java?",
        options: &["handle", "catch", "except", "trap"],
        correct: 1,
        explanation: "The catch keyword is used to handle exceptions in Java. It must be used with a try block.",
        difficulty: Easy,
        unit: "Unit I",
        topic: "Exception Handling",
    },
    QuestionSeed {
        id: "q6",
        prompt: "What is the parent class of all exceptions in Java?",
        options: &["Exception", "RuntimeException", "Throwable", "Error"],
        correct: 2,
        explanation: "Throwable is the parent class of all exceptions and errors in Java. Exception and Error both extend Throwable.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Exception Handling",
    },
    QuestionSeed {
        id: "q7",
        prompt: "Which of the following is a checked exception?",
        options: &[
            "NullPointerException",
            "IOException",
            "ArrayIndexOutOfBoundsException",
            "IllegalArgumentException",
        ],
        correct: 1,
        explanation: "IOException is a checked exception that must be either caught or declared in the method signature using throws.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Exception Handling",
    },
    QuestionSeed {
        id: "q8",
        prompt: "What is the purpose of the finally block?",
        options: &[
            "To handle exceptions",
            "To execute code that must run regardless of exceptions",
            "To throw exceptions",
            "To catch multiple exceptions",
        ],
        correct: 1,
        explanation: "The finally block contains code that executes regardless of whether an exception occurs or not. It's typically used for cleanup operations.",
        difficulty: Easy,
        unit: "Unit I",
        topic: "Exception Handling",
    },
    QuestionSeed {
        id: "q9",
        prompt: "Which method is used to wait for a thread to complete its execution?",
        options: &["wait()", "join()", "sleep()", "yield()"],
        correct: 1,
        explanation: "The join() method causes the current thread to wait until the thread on which join() is called completes its execution.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q10",
        prompt: "What is thread synchronization?",
        options: &[
            "Running multiple threads simultaneously",
            "Controlling access to shared resources by multiple threads",
            "Creating new threads",
            "Terminating threads",
        ],
        correct: 1,
        explanation: "Thread synchronization is the mechanism to control access to shared resources by multiple threads to prevent data corruption and ensure thread safety.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q41",
        prompt: "Which exception is thrown when a thread is interrupted while waiting?",
        options: &["ThreadException", "InterruptedException", "WaitException", "SleepException"],
        correct: 1,
        explanation: "InterruptedException is thrown when a thread is interrupted while it is in a waiting, sleeping, or blocked state.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q42",
        prompt: "What is the difference between throw and throws in Java?",
        options: &[
            "No difference",
            "throw is used to throw exceptions, throws is used to declare exceptions",
            "throws is used to throw exceptions, throw is used to declare exceptions",
            "Both are used to catch exceptions",
        ],
        correct: 1,
        explanation: "throw is used to explicitly throw an exception, while throws is used in method signature to declare that the method may throw certain exceptions.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Exception Handling",
    },
    QuestionSeed {
        id: "q50",
        prompt: "What is the purpose of the synchronized keyword?",
        options: &[
            "To make methods faster",
            "To prevent multiple threads from accessing a resource simultaneously",
            "To create new threads",
            "To handle exceptions",
        ],
        correct: 1,
        explanation: "The synchronized keyword is used to control access to methods or blocks by multiple threads, ensuring that only one thread can access the synchronized code at a time.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q51",
        prompt: "What is deadlock in multithreading?",
        options: &[
            "When a thread stops executing",
            "When two or more threads wait for each other indefinitely",
            "When a thread executes too slowly",
            "When a thread throws an exception",
        ],
        correct: 1,
        explanation: "Deadlock occurs when two or more threads are blocked forever, waiting for each other to release resources they need.",
        difficulty: Hard,
        unit: "Unit I",
        topic: "Multithreading",
    },
    QuestionSeed {
        id: "q52",
        prompt: "Which exception is unchecked in Java?",
        options: &["IOException", "SQLException", "RuntimeException", "ClassNotFoundException"],
        correct: 2,
        explanation: "RuntimeException and its subclasses are unchecked exceptions. They don't need to be declared in method signatures or caught explicitly.",
        difficulty: Medium,
        unit: "Unit I",
        topic: "Exception Handling",
    },
    QuestionSeed {
        id: "q60",
        prompt: "What is the difference between wait() and sleep()?",
        options: &[
            "No difference",
            "wait() releases lock, sleep() does not",
            "sleep() releases lock, wait() does not",
            "Both release locks",
        ],
        correct: 1,
        explanation: "wait() releases the object lock and must be called within synchronized context, while sleep() does not release any locks and can be called anywhere.",
        difficulty: Hard,
        unit: "Unit I",
        topic: "Multithreading",
    },
];

// Unit II: File I/O & Collections
const UNIT_II: [QuestionSeed; 15] = [
    QuestionSeed {
        id: "q11",
        prompt: "Which class is used to read characters from a file?",
        options: &["FileInputStream", "FileReader", "BufferedInputStream", "DataInputStream"],
        correct: 1,
        explanation: "FileReader is used to read character data from files. It extends InputStreamReader and is designed for reading character streams.",
        difficulty: Easy,
        unit: "Unit II",
        topic: "File I/O",
    },
    QuestionSeed {
        id: "q12",
        prompt: "What is the difference between FileInputStream and FileReader?",
        options: &[
            "No difference",
            "FileInputStream reads bytes, FileReader reads characters",
            "FileReader reads bytes, FileInputStream reads characters",
            "Both read the same data type",
        ],
        correct: 1,
        explanation: "FileInputStream is for reading raw bytes from files, while FileReader is for reading character data with proper encoding handling.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "File I/O",
    },
    QuestionSeed {
        id: "q13",
        prompt: "Which collection allows duplicate elements and maintains insertion order?",
        options: &["HashSet", "TreeSet", "ArrayList", "HashMap"],
        correct: 2,
        explanation: "ArrayList allows duplicate elements and maintains the insertion order. It's implemented as a resizable array.",
        difficulty: Easy,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q14",
        prompt: "Which collection does NOT allow duplicate elements?",
        options: &["ArrayList", "LinkedList", "HashSet", "Vector"],
        correct: 2,
        explanation: "HashSet does not allow duplicate elements. It uses the equals() and hashCode() methods to determine uniqueness.",
        difficulty: Easy,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q15",
        prompt: "What is the time complexity of adding an element to ArrayList?",
        options: &["O(1)", "O(log n)", "O(n)", "O(n²)"],
        correct: 0,
        explanation: "Adding an element to ArrayList is O(1) amortized time complexity, though it can be O(n) in worst case when resizing is needed.",
        difficulty: Hard,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q16",
        prompt: "Which interface is implemented by both ArrayList and LinkedList?",
        options: &["Set", "Map", "List", "Queue"],
        correct: 2,
        explanation: "Both ArrayList and LinkedList implement the List interface, which provides ordered collection functionality.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q17",
        prompt: "What is the purpose of BufferedReader?",
        options: &[
            "To read binary data",
            "To improve reading performance by buffering",
            "To write data to files",
            "To compress data",
        ],
        correct: 1,
        explanation: "BufferedReader improves reading performance by buffering characters in memory, reducing the number of I/O operations.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "File I/O",
    },
    QuestionSeed {
        id: "q18",
        prompt: "Which Map implementation maintains insertion order?",
        options: &["HashMap", "TreeMap", "LinkedHashMap", "Hashtable"],
        correct: 2,
        explanation: "LinkedHashMap maintains insertion order by using a doubly-linked list to track the order of entries.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q19",
        prompt: "What happens when you try to add a duplicate key to a HashMap?",
        options: &[
            "Exception is thrown",
            "Duplicate key is ignored",
            "Old value is replaced with new value",
            "Both values are stored",
        ],
        correct: 2,
        explanation: "When a duplicate key is added to HashMap, the old value is replaced with the new value, and the old value is returned.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q20",
        prompt: "Which method is used to close a file stream?",
        options: &["end()", "close()", "finish()", "stop()"],
        correct: 1,
        explanation: "The close() method is used to close file streams and release system resources. It should always be called when done with a stream.",
        difficulty: Easy,
        unit: "Unit II",
        topic: "File I/O",
    },
    QuestionSeed {
        id: "q43",
        prompt: "Which collection is best for frequent insertions and deletions in the middle?",
        options: &["ArrayList", "LinkedList", "Vector", "Stack"],
        correct: 1,
        explanation: "LinkedList is best for frequent insertions and deletions in the middle because it uses a doubly-linked list structure, making these operations O(1) when you have a reference to the node.",
        difficulty: Hard,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q44",
        prompt: "What is serialization in Java?",
        options: &[
            "Converting objects to XML",
            "Converting objects to byte streams",
            "Converting strings to objects",
            "Converting arrays to lists",
        ],
        correct: 1,
        explanation: "Serialization is the process of converting Java objects into byte streams so they can be saved to files, sent over networks, or stored in databases.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "File I/O",
    },
    QuestionSeed {
        id: "q53",
        prompt: "What is the difference between Iterator and ListIterator?",
        options: &[
            "No difference",
            "Iterator is bidirectional, ListIterator is unidirectional",
            "ListIterator is bidirectional, Iterator is unidirectional",
            "Both are identical",
        ],
        correct: 2,
        explanation: "ListIterator is bidirectional (can traverse forward and backward) and allows modification during iteration, while Iterator is unidirectional.",
        difficulty: Hard,
        unit: "Unit II",
        topic: "Collections",
    },
    QuestionSeed {
        id: "q54",
        prompt: "Which stream class is used for reading primitive data types?",
        options: &[
            "FileInputStream",
            "DataInputStream",
            "BufferedInputStream",
            "ObjectInputStream",
        ],
        correct: 1,
        explanation: "DataInputStream is used for reading primitive data types (int, double, boolean, etc.) from an input stream in a machine-independent way.",
        difficulty: Medium,
        unit: "Unit II",
        topic: "File I/O",
    },
    QuestionSeed {
        id: "q59",
        prompt: "Which collection maintains elements in sorted order?",
        options: &["HashSet", "LinkedHashSet", "TreeSet", "ArrayList"],
        correct: 2,
        explanation: "TreeSet maintains elements in sorted order using a Red-Black tree implementation. Elements must be Comparable or a Comparator must be provided.",
        difficulty: Easy,
        unit: "Unit II",
        topic: "Collections",
    },
];

// Unit III: GUI Programming
const UNIT_III: [QuestionSeed; 14] = [
    QuestionSeed {
        id: "q21",
        prompt: "Which is the top-level container in Swing?",
        options: &["JPanel", "JFrame", "JComponent", "JContainer"],
        correct: 1,
        explanation: "JFrame is a top-level container in Swing that represents a window with title bar, border, and other window decorations.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "GUI Components",
    },
    QuestionSeed {
        id: "q22",
        prompt: "Which layout manager divides the container into five regions?",
        options: &["FlowLayout", "GridLayout", "BorderLayout", "BoxLayout"],
        correct: 2,
        explanation: "BorderLayout divides the container into five regions: NORTH, SOUTH, EAST, WEST, and CENTER.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "Layout Managers",
    },
    QuestionSeed {
        id: "q23",
        prompt: "What is the default layout manager for JPanel?",
        options: &["BorderLayout", "FlowLayout", "GridLayout", "BoxLayout"],
        correct: 1,
        explanation: "FlowLayout is the default layout manager for JPanel. It arranges components in a left-to-right flow.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "Layout Managers",
    },
    QuestionSeed {
        id: "q24",
        prompt: "Which event is generated when a button is clicked?",
        options: &["MouseEvent", "ActionEvent", "KeyEvent", "WindowEvent"],
        correct: 1,
        explanation: "ActionEvent is generated when a button is clicked. It represents a semantic event indicating that a component-defined action occurred.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "Event Handling",
    },
    QuestionSeed {
        id: "q25",
        prompt: "Which interface must be implemented to handle button click events?",
        options: &["MouseListener", "ActionListener", "KeyListener", "WindowListener"],
        correct: 1,
        explanation: "ActionListener interface must be implemented to handle button click events. It has one method: actionPerformed().",
        difficulty: Easy,
        unit: "Unit III",
        topic: "Event Handling",
    },
    QuestionSeed {
        id: "q26",
        prompt: "What is the purpose of SwingUtilities.invokeLater()?",
        options: &[
            "To delay execution",
            "To run code on Event Dispatch Thread",
            "To create new threads",
            "To handle exceptions",
        ],
        correct: 1,
        explanation: "SwingUtilities.invokeLater() ensures that GUI code runs on the Event Dispatch Thread (EDT), which is required for thread safety in Swing.",
        difficulty: Hard,
        unit: "Unit III",
        topic: "Event Handling",
    },
    QuestionSeed {
        id: "q27",
        prompt: "Which layout manager arranges components in a rectangular grid?",
        options: &["FlowLayout", "BorderLayout", "GridLayout", "CardLayout"],
        correct: 2,
        explanation: "GridLayout arranges components in a rectangular grid where all components are the same size.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "Layout Managers",
    },
    QuestionSeed {
        id: "q28",
        prompt: "What is the difference between JTextField and JTextArea?",
        options: &[
            "No difference",
            "JTextField is for single line, JTextArea is for multiple lines",
            "JTextArea is for single line, JTextField is for multiple lines",
            "Both are identical",
        ],
        correct: 1,
        explanation: "JTextField is designed for single-line text input, while JTextArea is designed for multi-line text input and display.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "GUI Components",
    },
    QuestionSeed {
        id: "q29",
        prompt: "Which method is used to set the size of a JFrame?",
        options: &["setDimension()", "setSize()", "setBounds()", "setArea()"],
        correct: 1,
        explanation: "setSize() method is used to set the width and height of a JFrame. setBounds() can also be used to set both position and size.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "GUI Components",
    },
    QuestionSeed {
        id: "q30",
        prompt: "What is the purpose of the pack() method in JFrame?",
        options: &[
            "To minimize the window",
            "To resize the window to fit its components",
            "To close the window",
            "To hide the window",
        ],
        correct: 1,
        explanation: "The pack() method resizes the JFrame to fit the preferred sizes of its components, creating an optimal layout.",
        difficulty: Medium,
        unit: "Unit III",
        topic: "GUI Components",
    },
    QuestionSeed {
        id: "q45",
        prompt: "Which Swing component is used to display a list of items?",
        options: &["JComboBox", "JList", "JTable", "JTree"],
        correct: 1,
        explanation: "JList is used to display a list of items where users can select one or more items. JComboBox is for dropdown selection.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "GUI Components",
    },
    QuestionSeed {
        id: "q46",
        prompt: "What is the Event Dispatch Thread (EDT)?",
        options: &[
            "A thread for database operations",
            "A thread for handling GUI events",
            "A thread for file I/O",
            "A thread for network operations",
        ],
        correct: 1,
        explanation: "The Event Dispatch Thread (EDT) is a special thread in Swing that handles all GUI events and updates. All Swing components must be accessed from the EDT.",
        difficulty: Hard,
        unit: "Unit III",
        topic: "Event Handling",
    },
    QuestionSeed {
        id: "q55",
        prompt: "What is the purpose of CardLayout?",
        options: &[
            "To arrange components in a grid",
            "To show one component at a time from a stack",
            "To arrange components in a flow",
            "To divide container into regions",
        ],
        correct: 1,
        explanation: "CardLayout manages multiple components by showing only one component at a time, like a stack of cards where only the top card is visible.",
        difficulty: Medium,
        unit: "Unit III",
        topic: "Layout Managers",
    },
    QuestionSeed {
        id: "q56",
        prompt: "Which event is generated when a window is closed?",
        options: &["ActionEvent", "WindowEvent", "ComponentEvent", "ContainerEvent"],
        correct: 1,
        explanation: "WindowEvent is generated when window operations occur, including opening, closing, activating, and deactivating windows.",
        difficulty: Easy,
        unit: "Unit III",
        topic: "Event Handling",
    },
];

// Unit IV: JDBC
const UNIT_IV: [QuestionSeed; 15] = [
    QuestionSeed {
        id: "q31",
        prompt: "What does JDBC stand for?",
        options: &[
            "Java Database Connection",
            "Java Database Connectivity",
            "Java Data Base Control",
            "Java Database Communication",
        ],
        correct: 1,
        explanation: "JDBC stands for Java Database Connectivity. It is an API that provides a standard interface for connecting Java applications to databases.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "JDBC Basics",
    },
    QuestionSeed {
        id: "q32",
        prompt: "Which JDBC driver type is written entirely in Java?",
        options: &["Type 1", "Type 2", "Type 3", "Type 4"],
        correct: 3,
        explanation: "Type 4 (Thin Driver) is written entirely in Java and communicates directly with the database using the database's native protocol.",
        difficulty: Medium,
        unit: "Unit IV",
        topic: "JDBC Drivers",
    },
    QuestionSeed {
        id: "q33",
        prompt: "Which interface is used to execute SQL statements?",
        options: &["Connection", "Statement", "ResultSet", "DriverManager"],
        correct: 1,
        explanation: "Statement interface is used to execute SQL statements. PreparedStatement and CallableStatement are specialized versions of Statement.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "JDBC Interfaces",
    },
    QuestionSeed {
        id: "q34",
        prompt: "What is the advantage of PreparedStatement over Statement?",
        options: &[
            "Faster execution for repeated queries",
            "Prevents SQL injection",
            "Better performance",
            "All of the above",
        ],
        correct: 3,
        explanation: "PreparedStatement offers all these advantages: faster execution for repeated queries, SQL injection prevention, and better performance due to pre-compilation.",
        difficulty: Medium,
        unit: "Unit IV",
        topic: "JDBC Interfaces",
    },
    QuestionSeed {
        id: "q35",
        prompt: "Which method is used to establish a database connection?",
        options: &[
            "DriverManager.connect()",
            "DriverManager.getConnection()",
            "Connection.create()",
            "Database.connect()",
        ],
        correct: 1,
        explanation: "DriverManager.getConnection() is used to establish a connection to the database using the provided URL, username, and password.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "JDBC Connection",
    },
    QuestionSeed {
        id: "q36",
        prompt: "What is the purpose of ResultSet in JDBC?",
        options: &[
            "To execute queries",
            "To store query results",
            "To establish connections",
            "To manage transactions",
        ],
        correct: 1,
        explanation: "ResultSet represents the result set of a database query. It provides methods to navigate through and extract data from query results.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "JDBC Interfaces",
    },
    QuestionSeed {
        id: "q37",
        prompt: "Which method is used to move to the next row in ResultSet?",
        options: &["moveNext()", "next()", "forward()", "advance()"],
        correct: 1,
        explanation: "The next() method moves the cursor to the next row in the ResultSet and returns true if there are more rows.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "ResultSet Navigation",
    },
    QuestionSeed {
        id: "q38",
        prompt: "What is a transaction in database context?",
        options: &[
            "A single SQL statement",
            "A group of SQL statements that execute as a unit",
            "A database connection",
            "A table operation",
        ],
        correct: 1,
        explanation: "A transaction is a group of SQL statements that are executed as a single unit. Either all statements succeed (commit) or all fail (rollback).",
        difficulty: Medium,
        unit: "Unit IV",
        topic: "Transactions",
    },
    QuestionSeed {
        id: "q39",
        prompt: "Which method is used to commit a transaction?",
        options: &["save()", "commit()", "apply()", "execute()"],
        correct: 1,
        explanation: "The commit() method is used to make all changes made in the current transaction permanent.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "Transactions",
    },
    QuestionSeed {
        id: "q40",
        prompt: "What happens when autocommit is set to true?",
        options: &[
            "Transactions must be manually committed",
            "Each SQL statement is automatically committed",
            "No transactions are allowed",
            "All statements are rolled back",
        ],
        correct: 1,
        explanation: "When autocommit is true (default), each SQL statement is automatically committed immediately after execution.",
        difficulty: Medium,
        unit: "Unit IV",
        topic: "Transactions",
    },
    QuestionSeed {
        id: "q47",
        prompt: "Which SQL command is used to retrieve data from a database?",
        options: &["INSERT", "UPDATE", "SELECT", "DELETE"],
        correct: 2,
        explanation: "SELECT command is used to retrieve data from database tables. It is the most commonly used SQL command for querying data.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "SQL Operations",
    },
    QuestionSeed {
        id: "q48",
        prompt: "What is connection pooling?",
        options: &[
            "Creating multiple databases",
            "Reusing database connections to improve performance",
            "Connecting to multiple databases simultaneously",
            "Backing up database connections",
        ],
        correct: 1,
        explanation: "Connection pooling is a technique where a pool of database connections is maintained and reused, improving application performance by avoiding the overhead of creating new connections.",
        difficulty: Hard,
        unit: "Unit IV",
        topic: "Connection Management",
    },
    QuestionSeed {
        id: "q49",
        prompt: "Which method is used to execute SELECT queries in JDBC?",
        options: &["executeUpdate()", "executeQuery()", "execute()", "select()"],
        correct: 1,
        explanation: "executeQuery() method is used to execute SELECT queries that return a ResultSet containing the query results.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "JDBC Operations",
    },
    QuestionSeed {
        id: "q57",
        prompt: "What is a CallableStatement used for?",
        options: &[
            "Executing simple SQL statements",
            "Executing prepared statements",
            "Executing stored procedures",
            "Managing connections",
        ],
        correct: 2,
        explanation: "CallableStatement is used to execute stored procedures in the database. It extends PreparedStatement and can handle IN, OUT, and INOUT parameters.",
        difficulty: Hard,
        unit: "Unit IV",
        topic: "JDBC Interfaces",
    },
    QuestionSeed {
        id: "q58",
        prompt: "What is the purpose of rollback() in JDBC?",
        options: &[
            "To commit changes",
            "To undo changes made in current transaction",
            "To close connection",
            "To execute queries",
        ],
        correct: 1,
        explanation: "rollback() is used to undo all changes made in the current transaction and restore the database to its previous state.",
        difficulty: Easy,
        unit: "Unit IV",
        topic: "Transactions",
    },
];

impl QuestionSeed {
    fn to_question(&self) -> Question {
        Question {
            id: self.id.to_string(),
            prompt: self.prompt.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            correct_index: self.correct,
            explanation: self.explanation.to_string(),
            difficulty: self.difficulty,
            unit: self.unit.to_string(),
            topic: self.topic.to_string(),
        }
    }
}

/// Read-only question bank shared by every session.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Arc<Question>>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        validate(&questions)?;
        Ok(Self {
            questions: questions.into_iter().map(Arc::new).collect(),
        })
    }

    /// The course question bank compiled into the binary.
    pub fn builtin() -> Self {
        let questions: Vec<Question> = UNIT_I
            .iter()
            .chain(UNIT_II.iter())
            .chain(UNIT_III.iter())
            .chain(UNIT_IV.iter())
            .map(QuestionSeed::to_question)
            .collect();
        debug!(count = questions.len(), "Loaded builtin catalog");

        Self {
            questions: questions.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let questions: Vec<Question> = serde_json::from_reader(BufReader::new(file))?;
        let catalog = Self::new(questions)?;
        info!(path = %path.display(), count = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Question>> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Distinct unit tags in the order they first appear.
    pub fn units(&self) -> Vec<String> {
        let mut units: Vec<String> = Vec::new();
        for question in &self.questions {
            if !units.contains(&question.unit) {
                units.push(question.unit.clone());
            }
        }
        units
    }
}

fn validate(questions: &[Question]) -> Result<()> {
    let mut ids = HashSet::new();

    for question in questions {
        if question.id.trim().is_empty() {
            return Err(QuizError::InvalidCatalog("question with empty id".into()));
        }
        if !ids.insert(question.id.as_str()) {
            return Err(QuizError::InvalidCatalog(format!(
                "duplicate question id '{}'",
                question.id
            )));
        }
        if question.options.len() < 2 {
            return Err(QuizError::InvalidCatalog(format!(
                "question '{}' needs at least 2 options",
                question.id
            )));
        }
        if question.correct_index >= question.options.len() {
            return Err(QuizError::InvalidCatalog(format!(
                "question '{}' has correct index {} but only {} options",
                question.id,
                question.correct_index,
                question.options.len()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_QUESTIONS;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        let owned: Vec<Question> = catalog.questions().iter().map(|q| (**q).clone()).collect();

        assert!(validate(&owned).is_ok());
        assert_eq!(catalog.len(), 60);
        assert!(catalog.len() > MAX_QUESTIONS);
        assert_eq!(catalog.units(), vec!["Unit I", "Unit II", "Unit III", "Unit IV"]);
        assert_eq!(catalog.get("q32").map(|q| q.correct_option()), Some("Type 4"));
    }

    #[test]
    fn loads_json_with_legacy_field_names() {
        let json = r#"[{
            "id": "x1",
            "question": "Pick B",
            "options": ["A", "B"],
            "correctAnswer": 1,
            "explanation": "B it is",
            "difficulty": "Easy",
            "unit": "Unit I",
            "topic": "Basics"
        }]"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.questions()[0].prompt, "Pick B");
        assert_eq!(catalog.questions()[0].correct_index, 1);
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let json = r#"[{
            "id": "x1", "prompt": "?", "options": ["A", "B"], "correctIndex": 2,
            "explanation": "", "difficulty": "Hard", "unit": "U", "topic": "T"
        }]"#;

        assert!(matches!(
            Catalog::from_json_str(json),
            Err(QuizError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids_and_single_option_questions() {
        let question = Catalog::builtin().questions()[0].as_ref().clone();
        let duplicate = Catalog::new(vec![question.clone(), question.clone()]);
        assert!(matches!(duplicate, Err(QuizError::InvalidCatalog(_))));

        let mut lonely = question;
        lonely.options.truncate(1);
        lonely.correct_index = 0;
        assert!(matches!(Catalog::new(vec![lonely]), Err(QuizError::InvalidCatalog(_))));
    }
}
